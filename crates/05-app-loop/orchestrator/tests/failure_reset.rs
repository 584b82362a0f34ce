//! Integration tests for failure capture and dump-directory cleanup.

mod stubs;

use orchestrator::{AppModel, AppMsg, DiagnosticsConfig, MemorySink, Orchestrator};
use screen::{Failure, Program};
use std::fs;
use std::sync::Arc;
use stubs::{Arena, ArenaModel, ArenaMsg, Title};

/// Failure reports carry the error and JSON dumps of the model and message.
#[test]
fn on_failure_records_error_model_and_message() {
    let sink = Arc::new(MemorySink::new());
    let orchestrator = Orchestrator::new(Title, Arena).with_sink(sink.clone());

    let model = AppModel::Game(ArenaModel { score: 12 });
    let msg = AppMsg::Game(ArenaMsg::Add(3));
    let failure = Failure::new("attempt to divide by zero").with_trace("arena::update");

    orchestrator.on_failure(&failure, &model, &msg);

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.error, "attempt to divide by zero");
    assert_eq!(report.trace.as_deref(), Some("arena::update"));
    assert!(report.model.contains("\"Game\""), "{}", report.model);
    assert!(report.model.contains("\"score\": 12"), "{}", report.model);
    assert!(report.msg.contains("\"Add\": 3"), "{}", report.msg);

    assert_eq!(model, AppModel::Game(ArenaModel { score: 12 }));
}

/// Reset removes the dump directory and everything inside it.
#[test]
fn on_reset_removes_dump_directory() {
    let root = tempfile::tempdir().expect("tempdir");
    let dump_dir = root.path().join("debug-dump");
    fs::create_dir_all(dump_dir.join("nested")).expect("create dump dir");
    fs::write(dump_dir.join("nested/model.json"), b"{}").expect("write dump");
    fs::write(root.path().join("keep.txt"), b"keep").expect("write sibling");

    let orchestrator = Orchestrator::new(Title, Arena)
        .with_diagnostics(DiagnosticsConfig::new(&dump_dir));
    orchestrator.on_reset(&AppModel::Game(ArenaModel { score: 0 }));

    assert!(!dump_dir.exists(), "dump directory should be gone");
    assert!(root.path().join("keep.txt").exists(), "siblings are untouched");
}

/// Reset with no dump directory is a no-op and can be repeated.
#[test]
fn on_reset_is_idempotent() {
    let root = tempfile::tempdir().expect("tempdir");
    let dump_dir = root.path().join("never-created");
    fs::write(root.path().join("keep.txt"), b"keep").expect("write sibling");

    let orchestrator = Orchestrator::new(Title, Arena)
        .with_diagnostics(DiagnosticsConfig::new(&dump_dir));
    let model = AppModel::Game(ArenaModel { score: 0 });

    orchestrator.on_reset(&model);
    orchestrator.on_reset(&model);

    assert!(!dump_dir.exists());
    let entries: Vec<_> = fs::read_dir(root.path())
        .expect("read root")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("keep.txt")]);
}
