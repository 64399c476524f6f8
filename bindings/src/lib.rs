//! UniFFI bindings for estate-core.
//!
//! This crate provides Swift and Kotlin bindings via Mozilla's UniFFI.
//! The mobile shell holds one `Navigator` for the lifetime of the app and
//! renders whatever `props_json` returns after each call.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::warn;

// Re-export for UniFFI
uniffi::include_scaffolding!("estate");

// === Error Mapping ===

/// FFI-friendly error type
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("Unknown screen")]
    UnknownScreen,
    #[error("Missing user")]
    MissingUser,
    #[error("Invalid params")]
    InvalidParams,
}

impl From<estate_core::Error> for NavError {
    fn from(e: estate_core::Error) -> Self {
        match e {
            estate_core::Error::UnknownScreen { .. } => NavError::UnknownScreen,
            estate_core::Error::MissingUser => NavError::MissingUser,
            estate_core::Error::InvalidParams { .. } => NavError::InvalidParams,
        }
    }
}

// === Transition Types ===

/// How the active screen changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Push,
    Pop,
    Fallback,
    Reset,
}

impl From<estate_core::TransitionKind> for TransitionKind {
    fn from(kind: estate_core::TransitionKind) -> Self {
        match kind {
            estate_core::TransitionKind::Push => TransitionKind::Push,
            estate_core::TransitionKind::Pop => TransitionKind::Pop,
            estate_core::TransitionKind::Fallback => TransitionKind::Fallback,
            estate_core::TransitionKind::Reset => TransitionKind::Reset,
        }
    }
}

/// One change of the active screen, with screens as wire names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from_screen: String,
    pub to_screen: String,
    pub kind: TransitionKind,
}

impl From<estate_core::Transition> for Transition {
    fn from(t: estate_core::Transition) -> Self {
        Self {
            from_screen: t.from.as_str().to_string(),
            to_screen: t.to.as_str().to_string(),
            kind: t.kind.into(),
        }
    }
}

// === Navigator Wrapper ===

/// Thread-safe wrapper around estate_core::Controller for FFI
pub struct Navigator {
    inner: Mutex<estate_core::Controller>,
}

impl Navigator {
    /// Cold-start navigator with default configuration.
    pub fn new() -> Self {
        Self::from_config(estate_core::ControllerConfig::default())
    }

    /// Cold-start navigator with a custom splash fallback delay.
    pub fn with_splash_timeout(splash_timeout_ms: u64) -> Self {
        Self::from_config(estate_core::ControllerConfig {
            splash_timeout_ms,
            ..estate_core::ControllerConfig::default()
        })
    }

    fn from_config(config: estate_core::ControllerConfig) -> Self {
        Self {
            inner: Mutex::new(estate_core::Controller::new(config)),
        }
    }

    // A panic while holding the lock cannot leave the controller half
    // updated: every operation is a single synchronous call.
    fn controller(&self) -> MutexGuard<'_, estate_core::Controller> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn navigate(&self, screen: String, params_json: String) -> Transition {
        let params = parse_json(&params_json);
        self.controller().navigate_named(&screen, &params).into()
    }

    pub fn go_back(&self) -> Transition {
        self.controller().go_back().into()
    }

    pub fn complete_login(&self, response_json: String) -> Result<Transition, NavError> {
        let response = parse_json(&response_json);
        Ok(self.controller().complete_login(&response)?.into())
    }

    pub fn complete_otp_verification(&self) -> Transition {
        self.controller().complete_otp_verification().into()
    }

    pub fn complete_password_reset(&self) -> Transition {
        self.controller().complete_password_reset().into()
    }

    pub fn reset_session(&self) -> Transition {
        self.controller().reset_session().into()
    }

    pub fn start_splash(&self, now_ms: u64) -> Option<Transition> {
        self.controller().start_splash(now_ms).map(Into::into)
    }

    pub fn finish_splash(&self) -> Option<Transition> {
        self.controller().finish_splash().map(Into::into)
    }

    pub fn tick(&self, now_ms: u64) -> Option<Transition> {
        self.controller().tick(now_ms).map(Into::into)
    }

    pub fn active_screen(&self) -> String {
        self.controller().active().as_str().to_string()
    }

    pub fn history(&self) -> Vec<String> {
        self.controller()
            .history()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    pub fn can_go_back(&self) -> bool {
        !self.controller().history().is_empty()
    }

    /// Props of the active screen as a JSON object tagged with `screen`.
    pub fn props_json(&self) -> String {
        to_json(&self.controller().props())
    }

    /// Active screen, history and props as one JSON object.
    pub fn snapshot_json(&self) -> String {
        to_json(&self.controller().snapshot())
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

// === Free Functions ===

/// Landing screen name for a raw role string.
pub fn route_for_role(role: String) -> String {
    estate_core::route_for_role(&role).as_str().to_string()
}

/// Every registered screen name.
pub fn screen_names() -> Vec<String> {
    estate_core::ScreenId::ALL
        .iter()
        .map(|s| s.as_str().to_string())
        .collect()
}

/// Version of the core library.
pub fn core_version() -> String {
    estate_core::VERSION.to_string()
}

/// Parse JSON from the host. Empty or malformed input is `null`.
fn parse_json(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(error = %e, "host sent malformed JSON");
        Value::Null
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!(error = %e, "snapshot serialization failed");
        "{}".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_and_back() {
        let nav = Navigator::new();
        nav.finish_splash();
        assert_eq!(nav.active_screen(), "welcome");

        let t = nav.navigate("login".into(), String::new());
        assert_eq!(t.from_screen, "welcome");
        assert_eq!(t.to_screen, "login");
        assert_eq!(t.kind, TransitionKind::Push);
        assert!(nav.can_go_back());

        nav.go_back();
        assert_eq!(nav.active_screen(), "welcome");
        assert_eq!(nav.go_back().kind, TransitionKind::Fallback);
        assert_eq!(nav.active_screen(), "home");
    }

    #[test]
    fn test_malformed_params_json_still_navigates() {
        let nav = Navigator::new();
        nav.navigate("searchResults".into(), "{not json".into());
        assert_eq!(nav.active_screen(), "searchResults");
    }

    #[test]
    fn test_unknown_screen_falls_back() {
        let nav = Navigator::new();
        let t = nav.navigate("settings".into(), "{}".into());
        assert_eq!(t.to_screen, "welcome");
        assert_eq!(nav.history(), vec!["splash".to_string()]);
    }

    #[test]
    fn test_login_errors_are_mapped() {
        let nav = Navigator::new();
        let result = nav.complete_login("{\"token\":\"t\"}".into());
        assert!(matches!(result, Err(NavError::MissingUser)));
        assert_eq!(nav.active_screen(), "splash");

        let t = nav
            .complete_login("{\"user\":{\"id\":\"u\",\"role\":\"builder\"}}".into())
            .unwrap();
        assert_eq!(t.to_screen, "builderDashboard");
        assert_eq!(t.kind, TransitionKind::Reset);
    }

    #[test]
    fn test_splash_race() {
        let nav = Navigator::with_splash_timeout(2_000);
        assert!(nav.start_splash(0).is_none());
        assert!(nav.finish_splash().is_some());
        assert!(nav.tick(2_000).is_none());
        assert_eq!(nav.active_screen(), "welcome");
    }

    #[test]
    fn test_props_json() {
        let nav = Navigator::new();
        nav.navigate("searchResults".into(), "{\"searchQuery\":\"loft\"}".into());
        let props: Value = serde_json::from_str(&nav.props_json()).unwrap();
        assert_eq!(props["screen"], "searchResults");
        assert_eq!(props["query"], "loft");
    }

    #[test]
    fn test_free_functions() {
        assert_eq!(route_for_role("Agent ".into()), "agentDashboard");
        assert_eq!(screen_names().len(), 17);
        assert!(!core_version().is_empty());
    }
}
