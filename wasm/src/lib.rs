//! WebAssembly bindings for the Estate navigation controller.
//!
//! This crate exposes the controller to a JavaScript shell. Params, props
//! and transitions cross the boundary as JSON strings so the JS side stays
//! free of generated glue types.
//!
//! ```js
//! const nav = new Navigator();
//! nav.startSplash(performance.now());
//! nav.navigate("searchResults", JSON.stringify({ searchQuery: "loft" }));
//! render(JSON.parse(nav.propsJson()));
//! ```

use wasm_bindgen::prelude::*;

use estate_core::{Controller, ControllerConfig, ScreenId, Transition};
use serde_json::Value;
use tracing::warn;

/// Parse JSON from JS. Empty or malformed input is `null`.
fn parse_json(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(error = %e, "shell sent malformed JSON");
        Value::Null
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn transition_json(transition: Option<Transition>) -> String {
    to_json(&transition)
}

/// Navigation controller handle for JS.
#[wasm_bindgen]
pub struct Navigator {
    inner: Controller,
}

#[wasm_bindgen]
impl Navigator {
    /// Cold-start navigator on the splash screen.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Navigator {
        Navigator {
            inner: Controller::default(),
        }
    }

    /// Cold-start navigator with a custom splash fallback delay.
    #[wasm_bindgen(js_name = withSplashTimeout)]
    pub fn with_splash_timeout(splash_timeout_ms: u32) -> Navigator {
        Navigator {
            inner: Controller::new(ControllerConfig {
                splash_timeout_ms: u64::from(splash_timeout_ms),
                ..ControllerConfig::default()
            }),
        }
    }

    /// Navigate by screen name. Returns the transition as JSON.
    ///
    /// Never throws: unknown screens fall back to `welcome`, malformed
    /// params are dropped.
    pub fn navigate(&mut self, screen: &str, params_json: &str) -> String {
        let params = parse_json(params_json);
        transition_json(Some(self.inner.navigate_named(screen, &params)))
    }

    /// Back navigation. Returns the transition as JSON.
    #[wasm_bindgen(js_name = goBack)]
    pub fn go_back(&mut self) -> String {
        transition_json(Some(self.inner.go_back()))
    }

    /// Handle a login response. Throws if it carries no usable user.
    #[wasm_bindgen(js_name = completeLogin)]
    pub fn complete_login(&mut self, response_json: &str) -> Result<String, JsError> {
        let response = parse_json(response_json);
        self.inner
            .complete_login(&response)
            .map(|t| transition_json(Some(t)))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Handle a verified OTP code.
    #[wasm_bindgen(js_name = completeOtpVerification)]
    pub fn complete_otp_verification(&mut self) -> String {
        transition_json(Some(self.inner.complete_otp_verification()))
    }

    /// Password changed; return to login.
    #[wasm_bindgen(js_name = completePasswordReset)]
    pub fn complete_password_reset(&mut self) -> String {
        transition_json(Some(self.inner.complete_password_reset()))
    }

    /// Logout.
    #[wasm_bindgen(js_name = resetSession)]
    pub fn reset_session(&mut self) -> String {
        transition_json(Some(self.inner.reset_session()))
    }

    /// Show the splash and arm the fallback at `now_ms`.
    #[wasm_bindgen(js_name = startSplash)]
    pub fn start_splash(&mut self, now_ms: f64) -> String {
        transition_json(self.inner.start_splash(clock_ms(now_ms)))
    }

    /// Splash reported completion. Returns `null` JSON if nothing happened.
    #[wasm_bindgen(js_name = finishSplash)]
    pub fn finish_splash(&mut self) -> String {
        transition_json(self.inner.finish_splash())
    }

    /// Advance the clock. Returns `null` JSON if nothing happened.
    pub fn tick(&mut self, now_ms: f64) -> String {
        transition_json(self.inner.tick(clock_ms(now_ms)))
    }

    /// Active screen name.
    #[wasm_bindgen(js_name = activeScreen)]
    pub fn active_screen(&self) -> String {
        self.inner.active().as_str().to_string()
    }

    /// Whether back navigation has a history entry.
    #[wasm_bindgen(js_name = canGoBack)]
    pub fn can_go_back(&self) -> bool {
        !self.inner.history().is_empty()
    }

    /// Props of the active screen as JSON.
    #[wasm_bindgen(js_name = propsJson)]
    pub fn props_json(&self) -> String {
        to_json(&self.inner.props())
    }

    /// Active screen, history and props as JSON.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        to_json(&self.inner.snapshot())
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

/// `performance.now()` style clock value to whole milliseconds.
fn clock_ms(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        // Truncation is fine: the gate only compares against a deadline
        now_ms as u64
    } else {
        0
    }
}

/// Landing screen name for a raw role string.
#[wasm_bindgen(js_name = routeForRole)]
pub fn route_for_role(role: &str) -> String {
    estate_core::route_for_role(role).as_str().to_string()
}

/// Every registered screen name, comma separated.
#[wasm_bindgen(js_name = screenNames)]
pub fn screen_names() -> String {
    ScreenId::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_returns_transition_json() {
        let mut nav = Navigator::new();
        let t: Value = serde_json::from_str(&nav.navigate("login", "")).unwrap();
        assert_eq!(t["from"], "splash");
        assert_eq!(t["to"], "login");
        assert_eq!(t["kind"], "push");
    }

    #[test]
    fn splash_race_yields_one_transition() {
        let mut nav = Navigator::with_splash_timeout(5_000);
        assert_eq!(nav.start_splash(0.0), "null");
        assert_ne!(nav.finish_splash(), "null");
        assert_eq!(nav.tick(5_000.0), "null");
        assert_eq!(nav.active_screen(), "welcome");
    }

    #[test]
    fn clock_values_are_clamped() {
        assert_eq!(clock_ms(-5.0), 0);
        assert_eq!(clock_ms(f64::NAN), 0);
        assert_eq!(clock_ms(1234.9), 1234);
    }

    #[test]
    fn free_functions() {
        assert_eq!(route_for_role("ADMIN"), "adminDashboard");
        assert!(screen_names().starts_with("splash,welcome"));
    }
}
