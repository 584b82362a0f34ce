//! Ten Second Castle: a splash card followed by a siege played in ten-second rounds.

/// Siege screen.
pub mod game;
/// Title card shown at startup.
pub mod splash;

use orchestrator::{DiagnosticsConfig, Orchestrator};

pub use crate::game::{GameModel, GameMsg, GameScreen};
pub use crate::splash::{SplashModel, SplashMsg, SplashScreen};

/// The program the engine runs.
pub type CastleProgram = Orchestrator<SplashScreen, GameScreen>;

/// Wires the default screens with the given diagnostics settings.
pub fn program(diagnostics: DiagnosticsConfig) -> CastleProgram {
    Orchestrator::new(SplashScreen::default(), GameScreen::default())
        .with_diagnostics(diagnostics)
}
