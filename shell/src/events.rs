//! UI events and replay scripts.
//!
//! Screens report user actions and API outcomes as [`UiEvent`]s. The same
//! enum is the step format of replay scripts:
//!
//! ```json
//! [
//!   { "event": "splashComplete", "delayMs": 100 },
//!   { "event": "navigate", "screen": "login" },
//!   { "event": "loginSucceeded", "response": { "user": { "id": "u-1", "role": "agent" } } }
//! ]
//! ```

use std::path::Path;

use estate_core::Transition;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Something the UI reports to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UiEvent {
    /// Generic navigation with loose params.
    Navigate {
        /// Target screen name.
        screen: String,
        /// Param object (may be omitted).
        #[serde(default)]
        params: Value,
    },
    /// Hardware or header back.
    Back,
    /// Login API call succeeded.
    LoginSucceeded {
        /// Raw login response body.
        response: Value,
    },
    /// OTP API call verified the code.
    OtpVerified,
    /// Reset-password API call succeeded.
    PasswordResetDone,
    /// User logged out.
    Logout,
    /// Splash animation finished.
    SplashComplete,
}

impl UiEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Navigate { .. } => "navigate",
            UiEvent::Back => "back",
            UiEvent::LoginSucceeded { .. } => "loginSucceeded",
            UiEvent::OtpVerified => "otpVerified",
            UiEvent::PasswordResetDone => "passwordResetDone",
            UiEvent::Logout => "logout",
            UiEvent::SplashComplete => "splashComplete",
        }
    }
}

/// What the shell did with an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ShellEvent {
    /// The active screen changed.
    Transitioned(Transition),
    /// The controller refused the event (bad login response).
    Rejected {
        /// Human readable reason.
        reason: String,
    },
}

/// One step of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptStep {
    /// Wait this long before sending the event.
    #[serde(default)]
    pub delay_ms: u64,
    /// Event to send.
    #[serde(flatten)]
    pub event: UiEvent,
}

/// Errors loading a replay script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a script from JSON text.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let json = std::fs::read_to_string(path)?;
    parse_script(&json)
}
