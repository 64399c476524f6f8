//! Screen registry.
//!
//! The closed set of screens the app can show. Names on the wire are the
//! camelCase identifiers the UI layer uses (`propertyDetail`, `otp`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of one full-page screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenId {
    /// Cold-start splash.
    Splash,
    /// Signed-out landing page.
    Welcome,
    /// Email/password sign in.
    Login,
    /// Account registration form.
    Register,
    /// One-time code entry, shared by registration and password reset.
    Otp,
    /// Request a password reset code.
    ForgotPassword,
    /// Choose a new password after OTP verification.
    ResetPassword,
    /// Buyer home feed.
    Home,
    /// Current user's profile.
    Profile,
    /// Single listing.
    PropertyDetail,
    /// Results for a search query.
    SearchResults,
    /// Browse all listings.
    ExploreProperties,
    /// Landing screen for builders.
    BuilderDashboard,
    /// Landing screen for agents.
    AgentDashboard,
    /// Landing screen for admins.
    AdminDashboard,
    /// Report a listing.
    ReportProperty,
    /// Pay for a listing.
    Payment,
}

impl ScreenId {
    /// Every registered screen, in registry order.
    pub const ALL: [ScreenId; 17] = [
        ScreenId::Splash,
        ScreenId::Welcome,
        ScreenId::Login,
        ScreenId::Register,
        ScreenId::Otp,
        ScreenId::ForgotPassword,
        ScreenId::ResetPassword,
        ScreenId::Home,
        ScreenId::Profile,
        ScreenId::PropertyDetail,
        ScreenId::SearchResults,
        ScreenId::ExploreProperties,
        ScreenId::BuilderDashboard,
        ScreenId::AgentDashboard,
        ScreenId::AdminDashboard,
        ScreenId::ReportProperty,
        ScreenId::Payment,
    ];

    /// Wire name of the screen.
    pub const fn as_str(self) -> &'static str {
        match self {
            ScreenId::Splash => "splash",
            ScreenId::Welcome => "welcome",
            ScreenId::Login => "login",
            ScreenId::Register => "register",
            ScreenId::Otp => "otp",
            ScreenId::ForgotPassword => "forgotPassword",
            ScreenId::ResetPassword => "resetPassword",
            ScreenId::Home => "home",
            ScreenId::Profile => "profile",
            ScreenId::PropertyDetail => "propertyDetail",
            ScreenId::SearchResults => "searchResults",
            ScreenId::ExploreProperties => "exploreProperties",
            ScreenId::BuilderDashboard => "builderDashboard",
            ScreenId::AgentDashboard => "agentDashboard",
            ScreenId::AdminDashboard => "adminDashboard",
            ScreenId::ReportProperty => "reportProperty",
            ScreenId::Payment => "payment",
        }
    }

    /// Whether the screen belongs to the signed-out auth flow.
    pub const fn is_auth_flow(self) -> bool {
        matches!(
            self,
            ScreenId::Welcome
                | ScreenId::Login
                | ScreenId::Register
                | ScreenId::Otp
                | ScreenId::ForgotPassword
                | ScreenId::ResetPassword
        )
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        ScreenId::ALL
            .iter()
            .copied()
            .find(|screen| screen.as_str() == trimmed)
            .ok_or_else(|| Error::UnknownScreen {
                name: s.to_string(),
            })
    }
}
