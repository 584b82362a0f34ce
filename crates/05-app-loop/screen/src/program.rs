use crate::obj::Obj;
use crate::transition::Transition;
use effect::SubList;
use thiserror::Error;

/// Unhandled fault raised while the engine was running a program entry point.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct Failure {
    /// Human-readable fault description.
    pub message: String,
    /// Captured stack trace, when the engine recorded one.
    pub trace: Option<String>,
}

impl Failure {
    /// Failure without a backtrace.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: None,
        }
    }

    /// Attaches a rendered stack trace.
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

/// Entry points a generic engine drives once per turn.
///
/// Implementations hold only configuration; every call is a function of its
/// arguments apart from the diagnostic side effects of [`Program::on_failure`]
/// and [`Program::on_reset`].
pub trait Program {
    /// Unified model threaded through the loop by the engine.
    type Model;
    /// Unified message routed into [`Program::update`].
    type Msg: 'static;

    /// Builds the initial model and startup commands.
    fn init(&self) -> Transition<Self::Model, Self::Msg>;

    /// Consumes the current model and returns its replacement.
    fn update(&self, msg: Self::Msg, model: Self::Model) -> Transition<Self::Model, Self::Msg>;

    /// Standing effects for the current model.
    fn subscribe(&self, model: &Self::Model) -> SubList<Self::Msg>;

    /// Render-object tree for the current model.
    fn view(&self, model: &Self::Model) -> Obj;

    /// Records a fault raised by one of the other entry points.
    fn on_failure(&self, _failure: &Failure, _model: &Self::Model, _msg: &Self::Msg) {}

    /// Cleans up after a failure snapshot has been consumed.
    fn on_reset(&self, _model: &Self::Model) {}
}
