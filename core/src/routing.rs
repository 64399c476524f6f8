//! Auth completion routing.
//!
//! Maps the authenticated user's role to the screen they land on. Both the
//! post-login and the post-OTP redirect go through [`route_for_role`] so the
//! two paths cannot disagree.

use std::fmt;

use serde::Serialize;

use crate::screen::ScreenId;

/// Account type of the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default role, also used for anything unrecognized.
    #[default]
    Buyer,
    /// Lists new construction projects.
    Builder,
    /// Lists properties on behalf of owners.
    Agent,
    /// Moderates listings and reports.
    Admin,
}

impl Role {
    /// Normalize a raw role value from user data.
    ///
    /// Trims and lowercases. Missing, empty and unknown values are `Buyer`.
    pub fn normalize(raw: Option<&str>) -> Role {
        let Some(raw) = raw else {
            return Role::Buyer;
        };
        match raw.trim().to_lowercase().as_str() {
            "builder" => Role::Builder,
            "agent" => Role::Agent,
            "admin" => Role::Admin,
            _ => Role::Buyer,
        }
    }

    /// Lowercase name of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Builder => "builder",
            Role::Agent => "agent",
            Role::Admin => "admin",
        }
    }

    /// Landing screen after authentication.
    pub const fn landing_screen(self) -> ScreenId {
        match self {
            Role::Buyer => ScreenId::Home,
            Role::Builder => ScreenId::BuilderDashboard,
            Role::Agent => ScreenId::AgentDashboard,
            Role::Admin => ScreenId::AdminDashboard,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination screen for a raw role string.
///
/// # Example
///
/// ```
/// use estate_core::{route_for_role, ScreenId};
///
/// assert_eq!(route_for_role("Builder "), ScreenId::BuilderDashboard);
/// assert_eq!(route_for_role("unknown"), ScreenId::Home);
/// ```
pub fn route_for_role(role: &str) -> ScreenId {
    Role::normalize(Some(role)).landing_screen()
}
