use crate::obj::Obj;
use crate::transition::Transition;
use effect::SubList;

/// Independent screen-level state machine operating on its own model and messages.
pub trait Screen {
    /// Screen-local state.
    type Model;
    /// Screen-local message.
    type Msg: 'static;

    /// Builds the initial model and any startup commands.
    fn init(&self) -> Transition<Self::Model, Self::Msg>;

    /// Consumes the current model and returns its replacement.
    fn update(&self, msg: Self::Msg, model: Self::Model) -> Transition<Self::Model, Self::Msg>;

    /// Standing effects required while `model` is active.
    fn subscribe(&self, model: &Self::Model) -> SubList<Self::Msg>;

    /// Render-object tree for `model`.
    fn view(&self, model: &Self::Model) -> Obj;
}

/// Signal carried by a screen message asking to leave for the next screen.
pub trait Proceed {
    /// Returns `true` when the message requests the screen transition.
    fn proceed(&self) -> bool;
}
