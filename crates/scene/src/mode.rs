use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// UI mode handed to the scene by the hosting page.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Onboarding,
    Normal,
}

/// The only mode edge the scene reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub from: Mode,
    pub to: Mode,
}

/// Watches successive mode values and reports the `Onboarding -> Normal` edge once.
#[derive(Debug, Default)]
pub struct ModeTracker {
    current: Mode,
}

impl ModeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    pub fn observe(&mut self, mode: Mode) -> Option<ModeChange> {
        match (self.current, mode) {
            (Mode::Onboarding, Mode::Normal) => {
                self.current = Mode::Normal;
                info!("onboarding finished, scene entering normal mode");
                Some(ModeChange {
                    from: Mode::Onboarding,
                    to: Mode::Normal,
                })
            }
            (Mode::Normal, Mode::Onboarding) => {
                warn!("ignoring request to return to onboarding");
                None
            }
            _ => None,
        }
    }
}
