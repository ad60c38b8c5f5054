//! INFO events emitted while a run progresses.

use tempfile::tempdir;

use crate::common::{RecordingEngine, capture_logs, create_test_pdf, prefix_in, run_with_answer};

/// Lines of `logs` that are INFO events containing `message`.
fn info_lines<'a>(logs: &'a str, message: &str) -> Vec<&'a str> {
    logs.lines()
        .filter(|line| line.contains(" INFO ") || line.starts_with("INFO "))
        .filter(|line| line.contains(message))
        .collect()
}

#[test]
fn test_declined_run_logs_abort() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-001.pdf"), 1, 100);
    let engine = RecordingEngine::default();

    let ((result, _), logs) =
        capture_logs(|| run_with_answer(&prefix_in(dir.path(), "scan-"), "n\n", &engine));
    assert!(result.is_ok());

    let abort = info_lines(&logs, "not confirmed, nothing written");
    assert_eq!(abort.len(), 1, "logs were:\n{logs}");
    assert!(abort[0].contains("scan.pdf"));
    assert!(info_lines(&logs, "all done").is_empty());
}

#[test]
fn test_confirmed_run_logs_each_stage() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-001.pdf"), 2, 100);
    create_test_pdf(&dir.path().join("scan-002.pdf"), 1, 200);
    let engine = RecordingEngine::default();

    let ((result, _), logs) =
        capture_logs(|| run_with_answer(&prefix_in(dir.path(), "scan-"), "y\n", &engine));
    assert!(result.is_ok());

    let located = info_lines(&logs, "located input files");
    assert_eq!(located.len(), 1, "logs were:\n{logs}");
    assert!(located[0].contains("count=2"));

    let merged = info_lines(&logs, "merged documents in memory");
    assert_eq!(merged.len(), 1, "logs were:\n{logs}");
    assert!(merged[0].contains("pages=3"));

    let written = info_lines(&logs, "merged PDF written");
    assert_eq!(written.len(), 1, "logs were:\n{logs}");
    assert!(written[0].contains("bytes="));

    assert_eq!(info_lines(&logs, "all done").len(), 1, "logs were:\n{logs}");
    assert!(info_lines(&logs, "not confirmed").is_empty());
}
