//! Screen props.
//!
//! Each screen reads only the slice of the session context it needs. The
//! mapping is an exhaustive match over [`ScreenId`], so a new screen does not
//! compile until its props are defined here.
//!
//! Callbacks (`onBack`, `onLogout`, `onPropertyClick`, ...) are not data: the
//! host wires them to controller operations.

use serde::Serialize;

use crate::context::{PaymentDraft, ReportDraft, SessionContext};
use crate::otp::OtpPurpose;
use crate::property::{Property, UserDraft};
use crate::screen::ScreenId;

/// Data handed to the active screen on render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScreenProps {
    /// No data.
    Splash,
    /// No data.
    Welcome,
    /// Prefilled email, if one is known.
    Login {
        /// Last email entered during registration or reset.
        email: Option<String>,
    },
    /// No data.
    Register,
    /// Code entry.
    Otp {
        /// Flow this visit belongs to.
        purpose: Option<OtpPurpose>,
        /// Destination the code was sent to.
        email: Option<String>,
        /// Alternate destination.
        phone: Option<String>,
    },
    /// No data.
    ForgotPassword,
    /// New password entry.
    ResetPassword {
        /// Account being reset.
        email: Option<String>,
    },
    /// Buyer feed.
    Home {
        /// Greeting name.
        user_name: Option<String>,
    },
    /// Profile page.
    Profile {
        /// Everything known about the user.
        user: UserDraft,
    },
    /// Listing page.
    PropertyDetail {
        /// Selected listing.
        property: Option<Property>,
    },
    /// Search results.
    SearchResults {
        /// Query to run.
        query: String,
    },
    /// Browse listings.
    ExploreProperties {
        /// Optional prefilter.
        query: String,
    },
    /// Builder landing.
    BuilderDashboard {
        /// Greeting name.
        user_name: Option<String>,
    },
    /// Agent landing.
    AgentDashboard {
        /// Greeting name.
        user_name: Option<String>,
    },
    /// Admin landing.
    AdminDashboard {
        /// Greeting name.
        user_name: Option<String>,
    },
    /// Report form.
    ReportProperty {
        /// Listing being reported.
        draft: Option<ReportDraft>,
    },
    /// Checkout.
    Payment {
        /// Listing being paid for.
        draft: Option<PaymentDraft>,
    },
}

impl ScreenProps {
    /// Derive the props of `screen` from the context.
    pub fn derive(screen: ScreenId, ctx: &SessionContext) -> ScreenProps {
        let user = &ctx.user_draft;
        match screen {
            ScreenId::Splash => ScreenProps::Splash,
            ScreenId::Welcome => ScreenProps::Welcome,
            ScreenId::Login => ScreenProps::Login {
                email: user.email.clone(),
            },
            ScreenId::Register => ScreenProps::Register,
            ScreenId::Otp => ScreenProps::Otp {
                purpose: ctx.otp_purpose,
                email: user.email.clone(),
                phone: user.phone.clone(),
            },
            ScreenId::ForgotPassword => ScreenProps::ForgotPassword,
            ScreenId::ResetPassword => ScreenProps::ResetPassword {
                email: user.email.clone(),
            },
            ScreenId::Home => ScreenProps::Home {
                user_name: user.name.clone(),
            },
            ScreenId::Profile => ScreenProps::Profile { user: user.clone() },
            ScreenId::PropertyDetail => ScreenProps::PropertyDetail {
                property: ctx.selected_property.clone(),
            },
            ScreenId::SearchResults => ScreenProps::SearchResults {
                query: ctx.search_query.clone(),
            },
            ScreenId::ExploreProperties => ScreenProps::ExploreProperties {
                query: ctx.search_query.clone(),
            },
            ScreenId::BuilderDashboard => ScreenProps::BuilderDashboard {
                user_name: user.name.clone(),
            },
            ScreenId::AgentDashboard => ScreenProps::AgentDashboard {
                user_name: user.name.clone(),
            },
            ScreenId::AdminDashboard => ScreenProps::AdminDashboard {
                user_name: user.name.clone(),
            },
            ScreenId::ReportProperty => ScreenProps::ReportProperty {
                draft: ctx.report_draft.clone(),
            },
            ScreenId::Payment => ScreenProps::Payment {
                draft: ctx.payment_draft.clone(),
            },
        }
    }

    /// Screen these props belong to.
    pub fn screen(&self) -> ScreenId {
        match self {
            ScreenProps::Splash => ScreenId::Splash,
            ScreenProps::Welcome => ScreenId::Welcome,
            ScreenProps::Login { .. } => ScreenId::Login,
            ScreenProps::Register => ScreenId::Register,
            ScreenProps::Otp { .. } => ScreenId::Otp,
            ScreenProps::ForgotPassword => ScreenId::ForgotPassword,
            ScreenProps::ResetPassword { .. } => ScreenId::ResetPassword,
            ScreenProps::Home { .. } => ScreenId::Home,
            ScreenProps::Profile { .. } => ScreenId::Profile,
            ScreenProps::PropertyDetail { .. } => ScreenId::PropertyDetail,
            ScreenProps::SearchResults { .. } => ScreenId::SearchResults,
            ScreenProps::ExploreProperties { .. } => ScreenId::ExploreProperties,
            ScreenProps::BuilderDashboard { .. } => ScreenId::BuilderDashboard,
            ScreenProps::AgentDashboard { .. } => ScreenId::AgentDashboard,
            ScreenProps::AdminDashboard { .. } => ScreenId::AdminDashboard,
            ScreenProps::ReportProperty { .. } => ScreenId::ReportProperty,
            ScreenProps::Payment { .. } => ScreenId::Payment,
        }
    }
}
