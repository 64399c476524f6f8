//! OTP purpose disambiguation.
//!
//! The OTP screen is shared by two flows. The screen that navigates to it
//! tags the visit with an [`OtpPurpose`] through the `otpContext` param, and
//! [`resolve_verification`] turns a successful verification into the next
//! step of the right flow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routing::route_for_role;
use crate::screen::ScreenId;

/// Which flow an OTP screen visit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OtpPurpose {
    /// Verifying a freshly registered account.
    Registration,
    /// Verifying a password reset request.
    ForgotPassword,
}

impl OtpPurpose {
    /// Wire name of the purpose.
    pub const fn as_str(self) -> &'static str {
        match self {
            OtpPurpose::Registration => "registration",
            OtpPurpose::ForgotPassword => "forgotPassword",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "registration" => Ok(OtpPurpose::Registration),
            "forgotPassword" => Ok(OtpPurpose::ForgotPassword),
            _ => Err(()),
        }
    }
}

/// Next step after a successful OTP verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpOutcome {
    /// Push the reset-password screen, keeping history so the user can go
    /// back and re-enter the code.
    ResetPassword,
    /// Authentication finished; clear history and land on `destination`.
    Authenticated {
        /// Role landing screen.
        destination: ScreenId,
        /// `true` when no purpose was set and registration was assumed.
        assumed: bool,
    },
}

/// Decide where a verified OTP leads.
///
/// An unset purpose takes the registration branch. `role` is the raw role
/// accumulated in the user draft.
pub fn resolve_verification(purpose: Option<OtpPurpose>, role: Option<&str>) -> OtpOutcome {
    match purpose {
        Some(OtpPurpose::ForgotPassword) => OtpOutcome::ResetPassword,
        Some(OtpPurpose::Registration) | None => OtpOutcome::Authenticated {
            destination: route_for_role(role.unwrap_or_default()),
            assumed: purpose.is_none(),
        },
    }
}
