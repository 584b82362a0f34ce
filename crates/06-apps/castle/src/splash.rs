use effect::{Cmd, Sub, SubList};
use screen::{Obj, Proceed, Screen, Transition};
use serde::Serialize;
use std::time::Duration;

const TITLE: &str = "Ten Second Castle";
const DEFAULT_HOLD_TICKS: u32 = 3;

/// Title card that moves on after a few seconds or on the first press.
#[derive(Clone, Debug)]
pub struct SplashScreen {
    /// One-second ticks to wait before proceeding on its own.
    pub hold_ticks: u32,
}

impl Default for SplashScreen {
    fn default() -> Self {
        Self {
            hold_ticks: DEFAULT_HOLD_TICKS,
        }
    }
}

/// Countdown state of the title card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplashModel {
    /// One-second ticks seen so far.
    pub ticks: u32,
    /// Ticks to wait before proceeding, copied from the screen.
    pub hold_ticks: u32,
}

impl SplashModel {
    /// Ticks left before the card proceeds on its own.
    pub fn remaining(&self) -> u32 {
        self.hold_ticks.saturating_sub(self.ticks)
    }
}

/// Splash message; anything without `proceed` set is a one-second tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SplashMsg {
    /// Move on to the game.
    pub proceed: bool,
}

impl SplashMsg {
    /// One second passed.
    pub const TICK: SplashMsg = SplashMsg { proceed: false };
    /// Leave the title card.
    pub const PROCEED: SplashMsg = SplashMsg { proceed: true };
}

impl Proceed for SplashMsg {
    fn proceed(&self) -> bool {
        self.proceed
    }
}

impl Screen for SplashScreen {
    type Model = SplashModel;
    type Msg = SplashMsg;

    fn init(&self) -> Transition<SplashModel, SplashMsg> {
        let start = Transition::new(SplashModel {
            ticks: 0,
            hold_ticks: self.hold_ticks,
        });
        if self.hold_ticks == 0 {
            start.and(Cmd::msg(SplashMsg::PROCEED))
        } else {
            start
        }
    }

    fn update(&self, _msg: SplashMsg, model: SplashModel) -> Transition<SplashModel, SplashMsg> {
        let model = SplashModel {
            ticks: model.ticks.saturating_add(1),
            ..model
        };
        if model.remaining() == 0 {
            Transition::new(model).and(Cmd::msg(SplashMsg::PROCEED))
        } else {
            Transition::new(model)
        }
    }

    fn subscribe(&self, model: &SplashModel) -> SubList<SplashMsg> {
        let mut subs = SubList::new();
        subs.push(Sub::pointer(|_, _| SplashMsg::PROCEED));
        if model.remaining() > 0 {
            subs.push(Sub::every(Duration::from_secs(1), SplashMsg::TICK));
        }
        subs
    }

    fn view(&self, model: &SplashModel) -> Obj {
        Obj::new("splash")
            .child(Obj::label("title", TITLE))
            .child(Obj::label("hint", "tap to start"))
            .child(Obj::label("countdown", model.remaining().to_string()))
    }
}
