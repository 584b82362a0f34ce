//! Contracts between screens, the orchestrator, and the engine.
//!
//! The `screen` crate stays small. It defines the per-screen state machine
//! trait, the program trait the engine drives, and the value types that flow
//! between them.

/// Render-object tree produced by `view`.
pub mod obj;
/// Engine-facing program contract and failure payload.
pub mod program;
/// Per-screen state machine contract.
pub mod screen;
/// Model plus commands produced by `init` and `update`.
pub mod transition;

pub use crate::obj::Obj;
pub use crate::program::{Failure, Program};
pub use crate::screen::{Proceed, Screen};
pub use crate::transition::Transition;
pub use effect::{Cmd, CmdList, Sub, SubList};
