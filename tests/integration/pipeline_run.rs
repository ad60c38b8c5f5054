//! End-to-end runs that reach the prompt.

use std::fs;

use tempfile::tempdir;
use uniteocr::pipeline::RunOutcome;

use crate::common::{RecordingEngine, create_test_pdf, page_widths, prefix_in, run_with_answer};

#[test]
fn test_confirmed_run_merges_in_name_order() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-001.pdf"), 1, 100);
    create_test_pdf(&dir.path().join("scan-003.pdf"), 1, 300);
    create_test_pdf(&dir.path().join("scan-002.pdf"), 2, 200);
    fs::write(dir.path().join("scan-004.txt"), "notes").unwrap();

    let engine = RecordingEngine::default();
    let (result, printed) = run_with_answer(&prefix_in(dir.path(), "scan-0"), "y\n", &engine);

    let target = dir.path().join("scan.pdf");
    assert_eq!(
        result.unwrap(),
        RunOutcome::Completed {
            output: target.clone(),
            files: 3,
            pages: 4,
        }
    );
    assert_eq!(
        printed,
        format!("Write to target location '{}'? (y/n) ", target.display())
    );
    assert_eq!(page_widths(&target), vec![100, 200, 200, 300]);

    let calls = engine.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, target);
    assert_eq!(calls[0].1.languages, "hun+eng");
}

#[test]
fn test_uppercase_extension_is_included() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("page-a.PDF"), 1, 111);
    create_test_pdf(&dir.path().join("page-b.pdf"), 1, 222);

    let engine = RecordingEngine::default();
    let (result, _) = run_with_answer(&prefix_in(dir.path(), "page-"), "y", &engine);

    assert!(matches!(result.unwrap(), RunOutcome::Completed { files: 2, .. }));
    assert_eq!(page_widths(&dir.path().join("page.pdf")), vec![111, 222]);
}

#[test]
fn test_declined_run_writes_nothing() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-001.pdf"), 1, 100);

    let engine = RecordingEngine::default();
    let (result, _) = run_with_answer(&prefix_in(dir.path(), "scan-"), "n\n", &engine);

    let target = dir.path().join("scan.pdf");
    assert_eq!(
        result.unwrap(),
        RunOutcome::Aborted {
            output: target.clone()
        }
    );
    assert!(!target.exists());
    assert!(engine.calls.borrow().is_empty());
}

#[test]
fn test_only_lowercase_y_confirms() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-001.pdf"), 1, 100);

    for answer in ["Y\n", "yes\n", " y\n", ""] {
        let engine = RecordingEngine::default();
        let (result, _) = run_with_answer(&prefix_in(dir.path(), "scan-"), answer, &engine);

        assert!(
            matches!(result.unwrap(), RunOutcome::Aborted { .. }),
            "answer {answer:?} must not confirm"
        );
        assert!(engine.calls.borrow().is_empty());
    }
    assert!(!dir.path().join("scan.pdf").exists());
}

#[test]
fn test_no_matches_still_prompts_and_writes_empty_document() {
    let dir = tempdir().unwrap();

    let engine = RecordingEngine::default();
    let (result, printed) = run_with_answer(&prefix_in(dir.path(), "missing-"), "y\n", &engine);

    let target = dir.path().join("missing.pdf");
    assert_eq!(
        result.unwrap(),
        RunOutcome::Completed {
            output: target.clone(),
            files: 0,
            pages: 0,
        }
    );
    assert!(printed.starts_with("Write to target location"));
    assert!(page_widths(&target).is_empty());
    assert_eq!(engine.calls.borrow().len(), 1);
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("scan.pdf");
    fs::write(&target, b"stale").unwrap();
    create_test_pdf(&dir.path().join("scan-01.pdf"), 1, 123);

    let engine = RecordingEngine::default();
    let (result, _) = run_with_answer(&prefix_in(dir.path(), "scan-0"), "y\n", &engine);

    assert!(result.is_ok());
    assert_eq!(page_widths(&target), vec![123]);
    assert!(!dir.path().join("scan.pdf.tmp").exists());
}

#[test]
fn test_previous_output_is_merged_again() {
    // The output name still matches the prefix when the prefix ends in a
    // bare stem, so a rerun picks up the earlier result.
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("scan-1.pdf"), 1, 100);
    create_test_pdf(&dir.path().join("scan.pdf"), 1, 900);

    let engine = RecordingEngine::default();
    let (result, _) = run_with_answer(&prefix_in(dir.path(), "scan"), "y\n", &engine);

    assert!(matches!(result.unwrap(), RunOutcome::Completed { files: 2, .. }));
    assert_eq!(page_widths(&dir.path().join("scan.pdf")), vec![100, 900]);
}
