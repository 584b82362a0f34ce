//! Deferred effect descriptors shared between screens, the orchestrator, and
//! the engine.
//!
//! A [`Cmd`] is a one-shot effect that eventually yields a single message; a
//! [`Sub`] is a standing effect that yields zero or more messages until the
//! engine drops it. Neither is executed here. Both pair an engine-level
//! descriptor with a continuation, and mapping only ever rewraps the
//! continuation.

/// One-shot command descriptors and their outcomes.
pub mod cmd;
/// Standing subscription descriptors and the events they deliver.
pub mod sub;

pub use crate::cmd::{map_cmds, Cmd, CmdList, Effect, Outcome};
pub use crate::sub::{map_subs, Event, Source, Sub, SubList};
