//! Controller configuration.
//!
//! Plain values with defaults; hosts decide where they come from (the shell
//! reads them from the environment).

use crate::screen::ScreenId;
use crate::splash::DEFAULT_SPLASH_TIMEOUT_MS;

/// Tunable screens and delays for [`Controller`](crate::Controller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Fallback delay before the splash auto-advances (default: 5000 ms).
    pub splash_timeout_ms: u64,

    /// Where the splash advances to (default: `welcome`).
    pub splash_destination: ScreenId,

    /// Where back navigation lands on an empty history (default: `home`).
    pub back_fallback: ScreenId,

    /// Pushed instead of an unrecognized screen name (default: `welcome`).
    pub unknown_screen_fallback: ScreenId,

    /// Root screen after logout (default: `welcome`).
    pub logout_destination: ScreenId,

    /// Root screen after a password reset (default: `login`).
    pub password_reset_destination: ScreenId,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            splash_timeout_ms: DEFAULT_SPLASH_TIMEOUT_MS,
            splash_destination: ScreenId::Welcome,
            back_fallback: ScreenId::Home,
            unknown_screen_fallback: ScreenId::Welcome,
            logout_destination: ScreenId::Welcome,
            password_reset_destination: ScreenId::Login,
        }
    }
}
