//! Siege screen.
//!
//! The castle loses hit points at the end of every round. Each new round also
//! pays a random amount of gold, and a press spends gold on repairs. The siege
//! ends when the walls reach zero.

use effect::{Cmd, CmdList, Sub, SubList};
use screen::{Obj, Screen, Transition};
use serde::Serialize;

/// Most rounds a single frame can settle.
pub const MAX_ROUNDS_PER_FRAME: u32 = 16;

/// Tuning for the siege.
#[derive(Clone, Debug)]
pub struct GameScreen {
    /// Length of a round in seconds.
    pub round_secs: f32,
    /// Castle hit points at the start.
    pub max_hp: u32,
    /// Hit points lost when a round ends.
    pub siege_damage: u32,
    /// Inclusive gold range paid at the start of every round.
    pub income: (i64, i64),
    /// Gold spent per repair.
    pub repair_cost: i64,
    /// Hit points restored per repair.
    pub repair_amount: u32,
}

impl Default for GameScreen {
    fn default() -> Self {
        Self {
            round_secs: 10.0,
            max_hp: 100,
            siege_damage: 15,
            income: (2, 8),
            repair_cost: 5,
            repair_amount: 10,
        }
    }
}

/// State of a running siege.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameModel {
    /// Current round, starting at 1.
    pub round: u32,
    /// Seconds elapsed in the current round.
    pub clock: f32,
    /// Remaining castle hit points.
    pub castle_hp: u32,
    /// Gold available for repairs.
    pub gold: i64,
    /// Set once the walls fall; no further input is accepted.
    pub over: bool,
}

/// Input to the siege.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum GameMsg {
    /// Seconds elapsed since the previous frame.
    Frame(f32),
    /// Gold paid out for a round.
    Income(i64),
    /// Spend gold to patch the walls.
    Repair,
}

impl GameScreen {
    fn income_cmd(&self) -> Cmd<GameMsg> {
        Cmd::random(self.income.0, self.income.1, GameMsg::Income)
    }

    fn advance(&self, dt: f32, mut model: GameModel) -> Transition<GameModel, GameMsg> {
        let valid_dt = dt.is_finite() && dt > 0.0;
        let valid_round = self.round_secs.is_finite() && self.round_secs > 0.0;
        if model.over || !valid_dt || !valid_round {
            return Transition::new(model);
        }

        model.clock += dt;
        let mut cmds = CmdList::new();
        let mut rounds = 0;
        while model.clock >= self.round_secs && !model.over && rounds < MAX_ROUNDS_PER_FRAME {
            rounds += 1;
            model.clock -= self.round_secs;
            model.castle_hp = model.castle_hp.saturating_sub(self.siege_damage);
            if model.castle_hp == 0 {
                model.over = true;
            } else {
                model.round += 1;
                cmds.push(self.income_cmd());
            }
        }
        // Rounds beyond the per-frame cap are skipped.
        if model.clock >= self.round_secs {
            model.clock = model.clock.rem_euclid(self.round_secs);
        }
        Transition::with_cmds(model, cmds)
    }
}

impl Screen for GameScreen {
    type Model = GameModel;
    type Msg = GameMsg;

    fn init(&self) -> Transition<GameModel, GameMsg> {
        Transition::new(GameModel {
            round: 1,
            clock: 0.0,
            castle_hp: self.max_hp,
            gold: 0,
            over: false,
        })
        .and(self.income_cmd())
    }

    fn update(&self, msg: GameMsg, model: GameModel) -> Transition<GameModel, GameMsg> {
        match msg {
            GameMsg::Frame(dt) => self.advance(dt, model),
            GameMsg::Income(gold) => Transition::new(GameModel {
                gold: model.gold.saturating_add(gold),
                ..model
            }),
            GameMsg::Repair => {
                let can_repair =
                    !model.over && model.gold >= self.repair_cost && model.castle_hp < self.max_hp;
                if !can_repair {
                    return Transition::new(model);
                }
                Transition::new(GameModel {
                    gold: model.gold - self.repair_cost,
                    castle_hp: model
                        .castle_hp
                        .saturating_add(self.repair_amount)
                        .min(self.max_hp),
                    ..model
                })
            }
        }
    }

    fn subscribe(&self, model: &GameModel) -> SubList<GameMsg> {
        let mut subs = SubList::new();
        if !model.over {
            subs.push(Sub::frame(GameMsg::Frame));
            subs.push(Sub::pointer(|_, _| GameMsg::Repair));
        }
        subs
    }

    fn view(&self, model: &GameModel) -> Obj {
        let remaining = (self.round_secs - model.clock).max(0.0);
        let hud = Obj::new("hud")
            .child(Obj::label("round", format!("Round {}", model.round)))
            .child(Obj::label("clock", format!("{remaining:.1}s")))
            .child(Obj::label(
                "castle",
                format!("{}/{}", model.castle_hp, self.max_hp),
            ))
            .child(Obj::label("gold", model.gold.to_string()));

        let root = Obj::new("game").child(hud);
        if model.over {
            root.child(Obj::label(
                "game-over",
                format!("The castle fell in round {}", model.round),
            ))
        } else {
            root
        }
    }
}
