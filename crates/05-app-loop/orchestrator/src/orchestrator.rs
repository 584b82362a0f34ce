use crate::config::DiagnosticsConfig;
use crate::diagnostics::{remove_dump_dir, DiagnosticSink, FailureReport, LogSink};
use crate::model::{AppModel, AppMsg};
use effect::{map_subs, SubList};
use log::{debug, trace, warn};
use screen::{Failure, Obj, Proceed, Program, Screen, Transition};
use serde::Serialize;
use std::sync::Arc;

/// Unified model for a splash screen `S` followed by a game screen `G`.
pub type UnifiedModel<S, G> = AppModel<<S as Screen>::Model, <G as Screen>::Model>;
/// Unified message for a splash screen `S` followed by a game screen `G`.
pub type UnifiedMsg<S, G> = AppMsg<<S as Screen>::Msg, <G as Screen>::Msg>;

/// Routes engine calls to the active screen and lifts the results back.
///
/// The splash screen starts the program. A splash message whose
/// [`Proceed::proceed`] is set replaces the splash model with a fresh
/// [`Screen::init`] of the game screen; there is no way back.
pub struct Orchestrator<S, G> {
    splash: S,
    game: G,
    diagnostics: DiagnosticsConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S, G> Orchestrator<S, G> {
    /// Orchestrator with default diagnostics logging through [`LogSink`].
    pub fn new(splash: S, game: G) -> Self {
        Self {
            splash,
            game,
            diagnostics: DiagnosticsConfig::default(),
            sink: Arc::new(LogSink),
        }
    }

    /// Replaces the diagnostics configuration.
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Replaces the sink receiving failure reports.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Splash screen.
    pub fn splash(&self) -> &S {
        &self.splash
    }

    /// Game screen.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Active diagnostics configuration.
    pub fn diagnostics(&self) -> &DiagnosticsConfig {
        &self.diagnostics
    }
}

impl<S, G> Program for Orchestrator<S, G>
where
    S: Screen,
    G: Screen,
    S::Model: Serialize,
    G::Model: Serialize,
    S::Msg: Proceed + Serialize,
    G::Msg: Serialize,
{
    type Model = UnifiedModel<S, G>;
    type Msg = UnifiedMsg<S, G>;

    fn init(&self) -> Transition<Self::Model, Self::Msg> {
        self.splash.init().lift(AppModel::Splash, AppMsg::Splash)
    }

    fn update(&self, msg: Self::Msg, model: Self::Model) -> Transition<Self::Model, Self::Msg> {
        match (msg, model) {
            (AppMsg::Game(msg), AppModel::Game(model)) => {
                trace!("routing message to game");
                self.game.update(msg, model).lift(AppModel::Game, AppMsg::Game)
            }
            (AppMsg::Splash(msg), AppModel::Splash(_)) if msg.proceed() => {
                debug!("splash requested proceed; starting game");
                self.game.init().lift(AppModel::Game, AppMsg::Game)
            }
            (AppMsg::Splash(msg), AppModel::Splash(model)) => {
                trace!("routing message to splash");
                self.splash
                    .update(msg, model)
                    .lift(AppModel::Splash, AppMsg::Splash)
            }
            (msg, model) => {
                debug!(
                    "dropping {} message while {} is active",
                    msg.tag(),
                    model.tag()
                );
                Transition::new(model)
            }
        }
    }

    fn subscribe(&self, model: &Self::Model) -> SubList<Self::Msg> {
        match model {
            AppModel::Splash(model) => map_subs(self.splash.subscribe(model), AppMsg::Splash),
            AppModel::Game(model) => map_subs(self.game.subscribe(model), AppMsg::Game),
        }
    }

    fn view(&self, model: &Self::Model) -> Obj {
        match model {
            AppModel::Splash(model) => self.splash.view(model),
            AppModel::Game(model) => self.game.view(model),
        }
    }

    fn on_failure(&self, failure: &Failure, model: &Self::Model, msg: &Self::Msg) {
        let report = FailureReport::capture(failure, model, msg);
        self.sink.record(&report);
    }

    fn on_reset(&self, _model: &Self::Model) {
        if let Err(err) = remove_dump_dir(self.diagnostics.dump_dir()) {
            warn!("{err}");
        }
    }
}
