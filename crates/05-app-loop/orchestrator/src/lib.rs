//! Composition layer that runs independent screens under one engine loop.
//!
//! [`Orchestrator`] lifts a splash screen and a game screen into the unified
//! [`AppModel`]/[`AppMsg`] space, routes each message to the screen it was
//! tagged for, and rewraps the screen's commands and subscriptions so the
//! engine only ever sees unified types.

/// Diagnostic settings passed in by the integrator.
pub mod config;
/// Failure capture and dump-directory cleanup.
pub mod diagnostics;
/// Unified model and message enums.
pub mod model;
/// Screen routing and the engine-facing program implementation.
pub mod orchestrator;

pub use crate::config::{DiagnosticsConfig, DUMP_DIR_ENV};
pub use crate::diagnostics::{
    remove_dump_dir, DiagnosticError, DiagnosticSink, FailureReport, LogSink, MemorySink,
};
pub use crate::model::{AppModel, AppMsg, ScreenTag};
pub use crate::orchestrator::{Orchestrator, UnifiedModel, UnifiedMsg};
