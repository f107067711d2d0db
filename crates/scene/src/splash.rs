use crate::config::SplashConfig;
use crate::mode::Mode;
use crate::transition::COMPLETION_EPSILON_S;

/// Fraction of the fade during which the splash stays fully opaque.
const FADE_HOLD_FRACTION: f64 = 0.7;

/// Onboarding splash timer.
///
/// Reports [`Mode::Onboarding`] until `hold_s` has elapsed, then
/// [`Mode::Normal`] for the rest of the session.
#[derive(Debug, Clone)]
pub struct Splash {
    config: SplashConfig,
    elapsed_s: f64,
}

impl Splash {
    pub fn new(config: SplashConfig) -> Self {
        Self {
            config,
            elapsed_s: 0.0,
        }
    }

    pub fn advance(&mut self, dt_s: f64) -> Mode {
        if dt_s.is_finite() && dt_s > 0.0 {
            self.elapsed_s += dt_s;
        }
        self.mode()
    }

    pub fn mode(&self) -> Mode {
        if self.elapsed_s + COMPLETION_EPSILON_S >= self.config.hold_s {
            Mode::Normal
        } else {
            Mode::Onboarding
        }
    }

    pub fn is_visible(&self) -> bool {
        self.mode() == Mode::Onboarding
    }

    /// Overlay opacity: fully opaque for the first 70% of the fade, then
    /// smoothstepped to transparent.
    pub fn opacity(&self) -> f64 {
        let t = (self.elapsed_s / self.config.fade_s).clamp(0.0, 1.0);
        if t <= FADE_HOLD_FRACTION {
            return 1.0;
        }
        let u = (t - FADE_HOLD_FRACTION) / (1.0 - FADE_HOLD_FRACTION);
        1.0 - u * u * (3.0 - 2.0 * u)
    }
}
