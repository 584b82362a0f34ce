use serde::Serialize;
use std::fmt;

/// Discriminant naming each screen in the closed variant set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ScreenTag {
    /// Title card shown at startup.
    Splash,
    /// Main game loop.
    Game,
}

impl ScreenTag {
    /// Every screen, start screen first.
    pub const ALL: [ScreenTag; 2] = [ScreenTag::Splash, ScreenTag::Game];

    /// Display name of the screen.
    pub fn name(self) -> &'static str {
        match self {
            ScreenTag::Splash => "splash",
            ScreenTag::Game => "game",
        }
    }
}

impl fmt::Display for ScreenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unified model: exactly one screen's state, selected by the variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum AppModel<S, G> {
    /// Splash screen is active.
    Splash(S),
    /// Game screen is active.
    Game(G),
}

impl<S, G> AppModel<S, G> {
    /// Active screen.
    pub fn tag(&self) -> ScreenTag {
        match self {
            AppModel::Splash(_) => ScreenTag::Splash,
            AppModel::Game(_) => ScreenTag::Game,
        }
    }

    /// Splash state, if the splash screen is active.
    pub fn splash(&self) -> Option<&S> {
        match self {
            AppModel::Splash(model) => Some(model),
            AppModel::Game(_) => None,
        }
    }

    /// Game state, if the game screen is active.
    pub fn game(&self) -> Option<&G> {
        match self {
            AppModel::Game(model) => Some(model),
            AppModel::Splash(_) => None,
        }
    }
}

/// Unified message: one screen's message, tagged with the screen it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum AppMsg<S, G> {
    /// Message for the splash screen.
    Splash(S),
    /// Message for the game screen.
    Game(G),
}

impl<S, G> AppMsg<S, G> {
    /// Screen this message is addressed to.
    pub fn tag(&self) -> ScreenTag {
        match self {
            AppMsg::Splash(_) => ScreenTag::Splash,
            AppMsg::Game(_) => ScreenTag::Game,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_follow_variants() {
        let splash: AppModel<u8, &str> = AppModel::Splash(1);
        let game: AppModel<u8, &str> = AppModel::Game("running");

        assert_eq!(splash.tag(), ScreenTag::Splash);
        assert_eq!(splash.splash(), Some(&1));
        assert_eq!(splash.game(), None);
        assert_eq!(game.tag(), ScreenTag::Game);
        assert_eq!(game.game(), Some(&"running"));

        let msg: AppMsg<(), u8> = AppMsg::Game(3);
        assert_eq!(msg.tag(), ScreenTag::Game);
        assert_eq!(ScreenTag::ALL[0].to_string(), "splash");
    }
}
