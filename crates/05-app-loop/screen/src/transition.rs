use effect::{map_cmds, Cmd, CmdList};

/// Atomic result of `init` or `update`: the next model and the commands to run.
#[derive(Debug)]
pub struct Transition<M, Msg> {
    /// Model that replaces the previous one.
    pub model: M,
    /// Commands for the engine to execute.
    pub cmds: CmdList<Msg>,
}

impl<M, Msg: 'static> Transition<M, Msg> {
    /// Transition with no commands.
    pub fn new(model: M) -> Self {
        Self {
            model,
            cmds: CmdList::new(),
        }
    }

    /// Transition carrying a prepared command list.
    pub fn with_cmds(model: M, cmds: CmdList<Msg>) -> Self {
        Self { model, cmds }
    }

    /// Appends a command.
    pub fn and(mut self, cmd: Cmd<Msg>) -> Self {
        self.cmds.push(cmd);
        self
    }

    /// Lifts the model and every command's eventual message into an outer space.
    pub fn lift<N, B: 'static>(
        self,
        to_model: impl FnOnce(M) -> N,
        to_msg: impl Fn(Msg) -> B + Clone + Send + 'static,
    ) -> Transition<N, B> {
        Transition {
            model: to_model(self.model),
            cmds: map_cmds(self.cmds, to_msg),
        }
    }

    /// Splits the transition into its `(model, cmds)` tuple.
    pub fn into_parts(self) -> (M, CmdList<Msg>) {
        (self.model, self.cmds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effect::{Effect, Outcome};
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum Outer {
        Inner(u8),
    }

    #[test]
    fn lift_wraps_model_and_messages() {
        let transition = Transition::new(7u32)
            .and(Cmd::msg(1u8))
            .and(Cmd::after(Duration::from_secs(1), 2u8));

        let lifted = transition.lift(|n| n * 2, Outer::Inner);
        let (model, cmds) = lifted.into_parts();

        assert_eq!(model, 14);
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[1].effect(), &Effect::After(Duration::from_secs(1)));

        let messages: Vec<Outer> = cmds
            .into_iter()
            .map(|cmd| cmd.resolve(Outcome::Unit))
            .collect();
        assert_eq!(messages, vec![Outer::Inner(1), Outer::Inner(2)]);
    }
}
