//! Configuration for the Estate shell.
//!
//! All configuration is loaded from environment variables (a `.env` file is
//! honoured by the binary). Missing or unparsable values fall back to the
//! controller defaults.

use std::str::FromStr;
use std::time::Duration;

use estate_core::{ControllerConfig, ScreenId};
use tracing::warn;

/// Shell configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Splash fallback delay (default: 5 seconds)
    pub splash_timeout: Duration,

    /// Screen shown after the splash (default: welcome)
    pub splash_destination: ScreenId,

    /// Back navigation target on empty history (default: home)
    pub back_fallback: ScreenId,

    /// Pushed instead of unregistered screen names (default: welcome)
    pub unknown_screen_fallback: ScreenId,

    /// Root screen after logout (default: welcome)
    pub logout_destination: ScreenId,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ControllerConfig::default();
        Self {
            splash_timeout: Duration::from_millis(
                parse_var(&lookup, "ESTATE_SPLASH_TIMEOUT_MS").unwrap_or(defaults.splash_timeout_ms),
            ),
            splash_destination: parse_var(&lookup, "ESTATE_SPLASH_DESTINATION")
                .unwrap_or(defaults.splash_destination),
            back_fallback: parse_var(&lookup, "ESTATE_BACK_FALLBACK")
                .unwrap_or(defaults.back_fallback),
            unknown_screen_fallback: parse_var(&lookup, "ESTATE_UNKNOWN_SCREEN_FALLBACK")
                .unwrap_or(defaults.unknown_screen_fallback),
            logout_destination: parse_var(&lookup, "ESTATE_LOGOUT_DESTINATION")
                .unwrap_or(defaults.logout_destination),
        }
    }

    /// Controller settings derived from this configuration.
    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            splash_timeout_ms: u64::try_from(self.splash_timeout.as_millis()).unwrap_or(u64::MAX),
            splash_destination: self.splash_destination,
            back_fallback: self.back_fallback,
            unknown_screen_fallback: self.unknown_screen_fallback,
            logout_destination: self.logout_destination,
            ..ControllerConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}
