//! Minimal screens shared by the orchestrator integration tests.

#![allow(dead_code)]

use effect::{Cmd, Effect, Outcome, Sub, SubList};
use screen::{Obj, Proceed, Screen, Transition};
use serde::Serialize;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TitleModel {
    pub ticks: u32,
    pub caption: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TitleMsg {
    pub proceed: bool,
    pub ticks: u32,
}

impl TitleMsg {
    pub fn tick(ticks: u32) -> Self {
        Self {
            proceed: false,
            ticks,
        }
    }

    pub fn go() -> Self {
        Self {
            proceed: true,
            ticks: 0,
        }
    }
}

impl Proceed for TitleMsg {
    fn proceed(&self) -> bool {
        self.proceed
    }
}

/// Splash stand-in that accumulates ticks.
pub struct Title;

impl Screen for Title {
    type Model = TitleModel;
    type Msg = TitleMsg;

    fn init(&self) -> Transition<TitleModel, TitleMsg> {
        Transition::new(TitleModel {
            ticks: 0,
            caption: "castle".into(),
        })
    }

    fn update(&self, msg: TitleMsg, model: TitleModel) -> Transition<TitleModel, TitleMsg> {
        let ticks = model.ticks.saturating_add(msg.ticks);
        Transition::new(TitleModel { ticks, ..model }).and(Cmd::after(
            Duration::from_millis(u64::from(ticks)),
            TitleMsg::tick(1),
        ))
    }

    fn subscribe(&self, _model: &TitleModel) -> SubList<TitleMsg> {
        let mut subs = SubList::new();
        subs.push(Sub::every(Duration::from_secs(1), TitleMsg::tick(1)));
        subs
    }

    fn view(&self, model: &TitleModel) -> Obj {
        Obj::label("title", model.caption.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArenaModel {
    pub score: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ArenaMsg {
    Add(i64),
    Roll,
}

/// Game stand-in whose init differs visibly from any update result.
pub struct Arena;

pub const ARENA_START_SCORE: i64 = 100;

impl Screen for Arena {
    type Model = ArenaModel;
    type Msg = ArenaMsg;

    fn init(&self) -> Transition<ArenaModel, ArenaMsg> {
        Transition::new(ArenaModel {
            score: ARENA_START_SCORE,
        })
        .and(Cmd::random(1, 6, ArenaMsg::Add))
    }

    fn update(&self, msg: ArenaMsg, model: ArenaModel) -> Transition<ArenaModel, ArenaMsg> {
        match msg {
            ArenaMsg::Add(n) => Transition::new(ArenaModel {
                score: model.score.saturating_add(n),
            }),
            ArenaMsg::Roll => Transition::new(model).and(Cmd::random(1, 6, ArenaMsg::Add)),
        }
    }

    fn subscribe(&self, _model: &ArenaModel) -> SubList<ArenaMsg> {
        let mut subs = SubList::new();
        subs.push(Sub::frame(|_| ArenaMsg::Roll));
        subs
    }

    fn view(&self, model: &ArenaModel) -> Obj {
        Obj::new("arena").child(Obj::label("score", model.score.to_string()))
    }
}

/// Resolves every command with a fixed outcome so transitions can be compared.
pub fn summarize<M, Msg: 'static>(transition: Transition<M, Msg>) -> (M, Vec<(Effect, Msg)>) {
    let (model, cmds) = transition.into_parts();
    let resolved = cmds
        .into_iter()
        .map(|cmd| {
            let effect = cmd.effect().clone();
            (effect, cmd.resolve(Outcome::Number(3)))
        })
        .collect();
    (model, resolved)
}

/// Lifts a screen-local summary into the unified message space.
pub fn lift_summary<M, N, A, B>(
    (model, cmds): (M, Vec<(Effect, A)>),
    to_model: impl FnOnce(M) -> N,
    to_msg: impl Fn(A) -> B,
) -> (N, Vec<(Effect, B)>) {
    (
        to_model(model),
        cmds.into_iter()
            .map(|(effect, msg)| (effect, to_msg(msg)))
            .collect(),
    )
}
