use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TicketKind {
    Task,
    Issue,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Todo,
    #[serde(alias = "in_progress")]
    InProgress,
    Review,
    #[serde(alias = "completed")]
    Done,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Todo => "todo",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Review => "review",
            TicketStatus::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TicketStatus::Done)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TicketStatus::InProgress | TicketStatus::Review)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TicketStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "todo" => Ok(TicketStatus::Todo),
            "in-progress" | "in_progress" => Ok(TicketStatus::InProgress),
            "review" => Ok(TicketStatus::Review),
            "done" | "completed" => Ok(TicketStatus::Done),
            other => Err(format!("unsupported ticket status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: String,
    pub kind: TicketKind,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: TicketPriority,
    #[serde(default)]
    pub assignee_ids: Vec<String>,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl TicketRecord {
    pub fn is_assigned_to(&self, developer_id: &str) -> bool {
        self.assignee_ids.iter().any(|id| id == developer_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: String,
    pub ticket_id: String,
    pub author_id: String,
    pub created_at: String,
}

/// Raw activity for a team, as handed over by the dashboard API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamActivityInput {
    pub developer_ids: Vec<String>,
    #[serde(default)]
    pub tickets: Vec<TicketRecord>,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
    /// Reference instant (RFC 3339); defaults to now.
    #[serde(default)]
    pub as_of: Option<String>,
}
