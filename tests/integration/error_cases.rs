//! Runs that end in an error.

use std::fs;

use tempfile::tempdir;
use uniteocr::config::{Config, OcrConfig};
use uniteocr::error::{ErrorStage, OcrFailureReason, UniteError};
use uniteocr::walker;

use crate::common::{RecordingEngine, create_test_pdf, page_widths, prefix_in, run_with_answer};

#[test]
fn test_recursive_prefix_rejected_before_io() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-001.pdf"), 1, 100);
    let prefix = prefix_in(dir.path(), "**/scan-");

    let err = Config::new(prefix.clone(), OcrConfig::default()).unwrap_err();
    assert!(matches!(err, UniteError::RecursivePattern { .. }));
    assert!(err.is_pre_io());

    let err = walker::resolve_pdf_paths(&prefix).unwrap_err();
    assert_eq!(err.stage(), ErrorStage::Validation);

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_invalid_input_fails_before_prompt() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-001.pdf"), 1, 100);
    fs::write(dir.path().join("scan-002.pdf"), b"not a pdf at all").unwrap();

    let engine = RecordingEngine::default();
    let (result, printed) = run_with_answer(&prefix_in(dir.path(), "scan-"), "y\n", &engine);

    match result.unwrap_err() {
        UniteError::FailedToLoadPdf { path, .. } => {
            assert_eq!(path, dir.path().join("scan-002.pdf"));
        }
        other => panic!("expected FailedToLoadPdf, got {other:?}"),
    }
    assert!(printed.is_empty(), "no prompt after a merge failure");
    assert!(!dir.path().join("scan.pdf").exists());
    assert!(engine.calls.borrow().is_empty());
}

#[test]
fn test_ocr_failure_keeps_merged_file() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-001.pdf"), 2, 100);

    let engine = RecordingEngine::failing(3);
    let (result, _) = run_with_answer(&prefix_in(dir.path(), "scan-"), "y\n", &engine);

    let err = result.unwrap_err();
    assert_eq!(err.stage(), ErrorStage::Ocr);
    assert!(matches!(
        err,
        UniteError::OcrFailed {
            reason: OcrFailureReason::MissingDependency,
            ..
        }
    ));

    let target = dir.path().join("scan.pdf");
    assert!(err.to_string().contains(&target.display().to_string()));
    assert_eq!(page_widths(&target), vec![100, 100]);
}
