//! Failure capture and dump-directory cleanup.
//!
//! Reports are built from serializable snapshots of the model and message so
//! they can be read without a debugger. Nothing here is allowed to fail
//! outward: serialization and filesystem problems are folded into the report
//! text or logged.

use log::{error, info};
use parking_lot::Mutex;
use screen::Failure;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while producing diagnostics.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("failed to serialize diagnostic dump: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to remove dump directory {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Snapshot of a fault together with the model and message that triggered it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// Fault description.
    pub error: String,
    /// Stack trace captured by the engine, if any.
    pub trace: Option<String>,
    /// Pretty-printed JSON dump of the model.
    pub model: String,
    /// Pretty-printed JSON dump of the message.
    pub msg: String,
}

impl FailureReport {
    /// Captures `failure` with dumps of `model` and `msg`.
    pub fn capture<M: Serialize, Msg: Serialize>(failure: &Failure, model: &M, msg: &Msg) -> Self {
        Self {
            error: failure.message.clone(),
            trace: failure.trace.clone(),
            model: dump_or_placeholder(model),
            msg: dump_or_placeholder(msg),
        }
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.error)?;
        if let Some(trace) = &self.trace {
            writeln!(f, "{trace}")?;
        }
        writeln!(f, "Model:")?;
        writeln!(f, "{}", self.model)?;
        write!(f, "Msg: {}", self.msg)
    }
}

/// Serializes `value` as pretty JSON.
pub fn dump<T: Serialize>(value: &T) -> Result<String, DiagnosticError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn dump_or_placeholder<T: Serialize>(value: &T) -> String {
    dump(value).unwrap_or_else(|err| format!("<unavailable: {err}>"))
}

/// Destination for failure reports.
pub trait DiagnosticSink: Send + Sync {
    /// Records one report. Must not panic.
    fn record(&self, report: &FailureReport);
}

/// Sink that writes reports to the `log` facade at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, report: &FailureReport) {
        error!("{report}");
    }
}

/// Sink that keeps reports in memory, mostly for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<FailureReport>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out every report recorded so far.
    pub fn reports(&self) -> Vec<FailureReport> {
        self.reports.lock().clone()
    }

    /// Number of reports recorded so far.
    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    /// Returns `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, report: &FailureReport) {
        self.reports.lock().push(report.clone());
    }
}

/// Recursively removes `dir` if it exists.
///
/// Returns whether anything was removed. A directory that vanishes between
/// the existence check and the removal counts as already removed.
pub fn remove_dump_dir(dir: &Path) -> Result<bool, DiagnosticError> {
    if !dir.exists() {
        return Ok(false);
    }
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            info!("removed dump directory {}", dir.display());
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(DiagnosticError::Io {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("opaque handle"))
        }
    }

    #[test]
    fn capture_folds_serialization_errors_into_text() {
        let report = FailureReport::capture(&Failure::new("boom"), &Unserializable, &7u8);

        assert_eq!(report.error, "boom");
        assert!(report.model.starts_with("<unavailable:"), "{}", report.model);
        assert_eq!(report.msg, "7");
    }

    #[test]
    fn display_lists_error_trace_model_and_msg() {
        let failure = Failure::new("index out of bounds").with_trace("at update");
        let report = FailureReport::capture(&failure, &vec![1, 2], &"tick");
        let text = report.to_string();

        assert!(text.starts_with("index out of bounds\nat update\nModel:\n"));
        assert!(text.ends_with("Msg: \"tick\""));
    }

    #[test]
    fn memory_sink_accumulates_reports() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        let report = FailureReport::capture(&Failure::new("first"), &(), &());
        sink.record(&report);
        sink.record(&report);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.reports()[1].error, "first");
    }
}
