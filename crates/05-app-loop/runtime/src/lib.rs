//! Headless engine that drives a [`Program`] turn by turn.
//!
//! The harness owns the model, queues commands until a caller completes them
//! with an [`Outcome`], and keeps the current subscriptions so events can be
//! fed in. Faults raised by program code are caught here: the program's
//! `on_failure` and `on_reset` hooks run, then the program restarts from a
//! fresh `init` while the restart budget lasts.

mod error;
/// Fault and restart counters.
pub mod health;

pub use crate::error::{HarnessError, HarnessResult};
pub use crate::health::Health;

use crossbeam_channel::{Receiver, Sender};
use effect::{Cmd, Effect, Event, Outcome, SubList};
use log::{debug, error, info, warn};
use screen::{Failure, Obj, Program};
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};

/// Default number of restarts granted before the harness halts.
pub const DEFAULT_MAX_RESTARTS: u32 = 3;
/// Upper bound on immediate dispatches resolved in one drain.
pub const DEFAULT_DISPATCH_BUDGET: usize = 256;

/// Harness tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Restarts allowed after faults before the harness halts.
    pub max_restarts: u32,
    /// Maximum `Effect::Dispatch` commands resolved per [`Harness::drain_immediate`].
    pub dispatch_budget: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            max_restarts: DEFAULT_MAX_RESTARTS,
            dispatch_budget: DEFAULT_DISPATCH_BUDGET,
        }
    }
}

/// Single-threaded engine loop around a program.
pub struct Harness<P: Program> {
    program: P,
    config: HarnessConfig,
    model: Option<P::Model>,
    pending: VecDeque<Cmd<P::Msg>>,
    subs: SubList<P::Msg>,
    last_msg: Option<P::Msg>,
    inbox_tx: Sender<P::Msg>,
    inbox_rx: Receiver<P::Msg>,
    health: Health,
}

impl<P> Harness<P>
where
    P: Program,
    P::Model: Clone,
    P::Msg: Clone,
{
    /// Starts `program` with the default configuration.
    pub fn start(program: P) -> HarnessResult<Self> {
        Self::with_config(program, HarnessConfig::default())
    }

    /// Starts `program`, running its `init` and opening its subscriptions.
    pub fn with_config(program: P, config: HarnessConfig) -> HarnessResult<Self> {
        let (inbox_tx, inbox_rx) = crossbeam_channel::unbounded();
        let mut harness = Self {
            program,
            config,
            model: None,
            pending: VecDeque::new(),
            subs: SubList::new(),
            last_msg: None,
            inbox_tx,
            inbox_rx,
            health: Health::default(),
        };
        harness.boot().map_err(HarnessError::Init)?;
        Ok(harness)
    }

    /// Current model, `None` once halted.
    pub fn model(&self) -> Option<&P::Model> {
        self.model.as_ref()
    }

    /// Program being driven.
    pub fn program(&self) -> &P {
        &self.program
    }

    /// Fault counters.
    pub fn health(&self) -> Health {
        self.health
    }

    /// Sender for messages produced outside the loop; drained by [`Harness::pump`].
    pub fn inbox(&self) -> Sender<P::Msg> {
        self.inbox_tx.clone()
    }

    /// Effects of the queued commands, oldest first.
    pub fn pending_effects(&self) -> Vec<Effect> {
        self.pending.iter().map(|cmd| cmd.effect().clone()).collect()
    }

    /// Number of open subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subs.len()
    }

    /// Runs one update turn with `msg`.
    ///
    /// A fault inside the program is recovered from by restarting; it only
    /// surfaces as an error once the restart budget is spent.
    pub fn dispatch(&mut self, msg: P::Msg) -> HarnessResult<()> {
        let Some(model) = self.model.take() else {
            return Err(self.halted());
        };
        let snapshot = model.clone();
        let program = &self.program;
        let turn_msg = msg.clone();
        match catch(|| program.update(turn_msg, model)) {
            Ok(transition) => {
                let (model, cmds) = transition.into_parts();
                self.pending.extend(cmds);
                self.last_msg = Some(msg.clone());
                match self.resubscribe(&model) {
                    Ok(()) => {
                        self.model = Some(model);
                        Ok(())
                    }
                    Err(failure) => self.recover(failure, &model, &msg),
                }
            }
            Err(failure) => self.recover(failure, &snapshot, &msg),
        }
    }

    /// Dispatches every message waiting in the inbox, returning how many ran.
    pub fn pump(&mut self) -> HarnessResult<usize> {
        let mut count = 0;
        while let Ok(msg) = self.inbox_rx.try_recv() {
            self.dispatch(msg)?;
            count += 1;
        }
        Ok(count)
    }

    /// Resolves the oldest queued command with `outcome` and dispatches its message.
    ///
    /// Returns `false` when nothing was queued.
    pub fn complete_next(&mut self, outcome: Outcome) -> HarnessResult<bool> {
        let Some(cmd) = self.pending.pop_front() else {
            return Ok(false);
        };
        debug!("completing {:?} with {outcome:?}", cmd.effect());
        let msg = cmd.resolve(outcome);
        self.dispatch(msg)?;
        Ok(true)
    }

    /// Resolves queued [`Effect::Dispatch`] commands, including ones they enqueue.
    ///
    /// Stops after the configured dispatch budget; returns how many ran.
    pub fn drain_immediate(&mut self) -> HarnessResult<usize> {
        let mut count = 0;
        while count < self.config.dispatch_budget {
            let Some(index) = self
                .pending
                .iter()
                .position(|cmd| *cmd.effect() == Effect::Dispatch)
            else {
                break;
            };
            let Some(cmd) = self.pending.remove(index) else {
                break;
            };
            self.dispatch(cmd.resolve(Outcome::Unit))?;
            count += 1;
        }
        if count == self.config.dispatch_budget {
            warn!("dispatch budget of {count} exhausted");
        }
        Ok(count)
    }

    /// Delivers `event` to every subscription whose source produces it.
    ///
    /// Messages are collected before any is dispatched, so subscriptions
    /// replaced by an earlier message in the batch still see this event. A
    /// restart partway through drops the rest of the batch; the count covers
    /// only messages that were dispatched.
    pub fn emit(&mut self, event: Event) -> HarnessResult<usize> {
        let msgs: Vec<P::Msg> = self
            .subs
            .iter()
            .filter(|sub| event.matches(sub.source()))
            .map(|sub| sub.deliver(event.clone()))
            .collect();
        let total = msgs.len();
        let generation = self.health.restarts;
        let mut count = 0;
        for msg in msgs {
            if self.health.restarts != generation {
                debug!("dropped {} messages for {event:?} after restart", total - count);
                break;
            }
            self.dispatch(msg)?;
            count += 1;
        }
        Ok(count)
    }

    /// Advances one frame: inbox, frame event, then immediate dispatches.
    pub fn run_frame(&mut self, dt: f32) -> HarnessResult<()> {
        self.pump()?;
        self.emit(Event::Frame { dt })?;
        self.drain_immediate()?;
        Ok(())
    }

    /// Renders the current model.
    pub fn view(&mut self) -> HarnessResult<Obj> {
        let Some(model) = self.model.take() else {
            return Err(self.halted());
        };
        let program = &self.program;
        match catch(|| program.view(&model)) {
            Ok(obj) => {
                self.model = Some(model);
                Ok(obj)
            }
            Err(failure) => match self.last_msg.clone() {
                Some(msg) => {
                    self.recover(failure, &model, &msg)?;
                    Ok(Obj::default())
                }
                None => {
                    error!("view failed before any message was dispatched: {failure}");
                    self.program.on_reset(&model);
                    self.health.record_fault();
                    self.restart()?;
                    Ok(Obj::default())
                }
            },
        }
    }

    /// Runs `init` and opens its subscriptions.
    ///
    /// A fault here has no model or message to report, so no hook runs; the
    /// caller counts it and either fails startup or spends another restart.
    fn boot(&mut self) -> Result<(), Failure> {
        let program = &self.program;
        let (model, cmds) = catch(|| program.init())?.into_parts();
        self.pending = cmds.into_iter().collect();
        self.resubscribe(&model)?;
        self.model = Some(model);
        Ok(())
    }

    fn resubscribe(&mut self, model: &P::Model) -> Result<(), Failure> {
        let program = &self.program;
        self.subs = catch(|| program.subscribe(model))?;
        Ok(())
    }

    fn recover(&mut self, failure: Failure, model: &P::Model, msg: &P::Msg) -> HarnessResult<()> {
        self.health.record_fault();
        error!("program fault: {failure}");
        self.program.on_failure(&failure, model, msg);
        self.program.on_reset(model);
        self.restart()
    }

    fn restart(&mut self) -> HarnessResult<()> {
        self.model = None;
        self.pending.clear();
        self.subs.clear();
        self.last_msg = None;
        let dropped = self.inbox_rx.try_iter().count();
        if dropped > 0 {
            debug!("dropped {dropped} inbox messages on restart");
        }

        while self.health.try_restart(self.config.max_restarts) {
            info!("restarting program (restart {})", self.health.restarts);
            match self.boot() {
                Ok(()) => return Ok(()),
                Err(failure) => {
                    self.health.record_fault();
                    error!("program fault during restart: {failure}");
                }
            }
        }
        Err(self.halted())
    }

    fn halted(&self) -> HarnessError {
        HarnessError::Halted {
            faults: self.health.faults,
        }
    }
}

fn catch<R>(f: impl FnOnce() -> R) -> Result<R, Failure> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| Failure::new(panic_message(&*payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_reads_str_and_string_payloads() {
        let failure = catch(|| panic!("static message")).unwrap_err();
        assert_eq!(failure.message, "static message");

        let failure = catch(|| panic!("formatted {}", 7)).unwrap_err();
        assert_eq!(failure.message, "formatted 7");

        let failure = catch(|| std::panic::panic_any(42u8)).unwrap_err();
        assert_eq!(failure.message, "non-string panic payload");
    }
}
