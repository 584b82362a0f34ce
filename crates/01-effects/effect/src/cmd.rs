use smallvec::SmallVec;
use std::fmt;
use std::time::Duration;

/// Inline list of commands returned from a single transition.
pub type CmdList<Msg> = SmallVec<[Cmd<Msg>; 4]>;

/// Work the engine performs on behalf of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Deliver the message on the next turn without doing any work.
    Dispatch,
    /// Deliver the message once the duration has elapsed.
    After(Duration),
    /// Draw a uniformly distributed integer in `low..=high`.
    Random {
        /// Inclusive lower bound.
        low: i64,
        /// Inclusive upper bound.
        high: i64,
    },
}

/// Result the engine feeds back into a command continuation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Effect completed without a payload.
    Unit,
    /// Timer effect fired.
    Elapsed,
    /// Integer produced by a [`Effect::Random`] draw.
    Number(i64),
}

/// One-shot deferred effect that resolves into a single `Msg`.
pub struct Cmd<Msg> {
    effect: Effect,
    resolve: Box<dyn FnOnce(Outcome) -> Msg + Send>,
}

impl<Msg: 'static> Cmd<Msg> {
    /// Builds a command from an effect and its continuation.
    pub fn new(effect: Effect, resolve: impl FnOnce(Outcome) -> Msg + Send + 'static) -> Self {
        Self {
            effect,
            resolve: Box::new(resolve),
        }
    }

    /// Command that hands `msg` straight back to the update loop.
    pub fn msg(msg: Msg) -> Self
    where
        Msg: Send,
    {
        Self::new(Effect::Dispatch, move |_| msg)
    }

    /// Command that delivers `msg` after `delay`.
    pub fn after(delay: Duration, msg: Msg) -> Self
    where
        Msg: Send,
    {
        Self::new(Effect::After(delay), move |_| msg)
    }

    /// Command that draws an integer in `low..=high` and wraps it with `to_msg`.
    ///
    /// Bounds are swapped when given in reverse order. An outcome other than
    /// [`Outcome::Number`] resolves as `low`.
    pub fn random(low: i64, high: i64, to_msg: impl FnOnce(i64) -> Msg + Send + 'static) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self::new(Effect::Random { low, high }, move |outcome| match outcome {
            Outcome::Number(value) => to_msg(value.clamp(low, high)),
            Outcome::Unit | Outcome::Elapsed => to_msg(low),
        })
    }

    /// Effect the engine must run for this command.
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    /// Rewraps the eventual message; the effect itself is moved through untouched.
    pub fn map<B: 'static>(self, f: impl FnOnce(Msg) -> B + Send + 'static) -> Cmd<B> {
        let resolve = self.resolve;
        Cmd {
            effect: self.effect,
            resolve: Box::new(move |outcome| f(resolve(outcome))),
        }
    }

    /// Consumes the command with the engine's outcome and yields its message.
    pub fn resolve(self, outcome: Outcome) -> Msg {
        (self.resolve)(outcome)
    }
}

impl<Msg> fmt::Debug for Cmd<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cmd").field("effect", &self.effect).finish()
    }
}

/// Maps every command in `cmds` into another message space.
pub fn map_cmds<A: 'static, B: 'static>(
    cmds: CmdList<A>,
    f: impl Fn(A) -> B + Clone + Send + 'static,
) -> CmdList<B> {
    cmds.into_iter().map(|cmd| cmd.map(f.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_normalizes_reversed_bounds() {
        let cmd = Cmd::random(9, 3, |n| n);
        assert_eq!(cmd.effect(), &Effect::Random { low: 3, high: 9 });
    }

    #[test]
    fn random_clamps_out_of_range_outcomes() {
        assert_eq!(Cmd::random(1, 6, |n| n).resolve(Outcome::Number(40)), 6);
        assert_eq!(Cmd::random(1, 6, |n| n).resolve(Outcome::Elapsed), 1);
    }

    #[test]
    fn debug_shows_effect_only() {
        let cmd = Cmd::after(Duration::from_millis(5), ());
        assert_eq!(format!("{cmd:?}"), "Cmd { effect: After(5ms) }");
    }
}
