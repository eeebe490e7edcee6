use pulseboard::utils::logger;
use pulseboard::AppError;
use tempfile::tempdir;
use tracing_subscriber::util::SubscriberInitExt;

#[test]
fn test_foreign_subscriber_error_is_reported_on_every_retry() {
    tracing_subscriber::registry().try_init().unwrap();

    let dir = tempdir().unwrap();
    let log_dir = dir.path().join("logs");

    for _ in 0..2 {
        let err = logger::init_logging(Some(&log_dir), "info").unwrap_err();
        match err {
            AppError::Other(message) => {
                assert!(message.contains("failed to install subscriber"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(!logger::is_initialized());
}
