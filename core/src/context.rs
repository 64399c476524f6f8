//! Session context store.
//!
//! Cross-screen transient state. Written only through [`SessionContext::merge`]
//! with a [`ContextPatch`]; keys absent from the patch keep their values.
//! Nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::otp::OtpPurpose;
use crate::property::{Property, UserDraft};

/// Listing snapshot for the report screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    /// Listing id.
    pub property_id: Option<String>,
    /// Listing name.
    pub property_name: Option<String>,
    /// Listing address.
    pub property_address: Option<String>,
    /// Listing price.
    pub property_price: Option<String>,
    /// Listing cover image.
    pub property_image: Option<String>,
}

/// Listing snapshot for the payment screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    /// Listing id.
    pub property_id: Option<String>,
    /// Listing name.
    pub property_name: Option<String>,
    /// Amount to pay.
    pub property_price: Option<String>,
}

/// Cross-screen session payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    /// Listing opened from a list or search.
    pub selected_property: Option<Property>,
    /// Last search text. Empty when never searched.
    pub search_query: String,
    /// Pending report.
    pub report_draft: Option<ReportDraft>,
    /// Pending payment.
    pub payment_draft: Option<PaymentDraft>,
    /// Flow the current OTP visit belongs to.
    pub otp_purpose: Option<OtpPurpose>,
    /// User fields gathered before and during authentication.
    pub user_draft: UserDraft,
}

/// A partial update of [`SessionContext`].
///
/// `None` means "not provided". Drafts replace the previous draft as a unit,
/// the user draft merges per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextPatch {
    /// Replace the selected listing.
    pub selected_property: Option<Property>,
    /// Replace the search text.
    pub search_query: Option<String>,
    /// Replace the report draft.
    pub report_draft: Option<ReportDraft>,
    /// Replace the payment draft.
    pub payment_draft: Option<PaymentDraft>,
    /// Set (`Some(Some(_))`) or clear (`Some(None)`) the OTP purpose.
    pub otp_purpose: Option<Option<OtpPurpose>>,
    /// Fields to merge into the user draft.
    pub user: Option<UserDraft>,
}

impl ContextPatch {
    /// Whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == ContextPatch::default()
    }
}

impl SessionContext {
    /// Apply every key present in `patch`.
    pub fn merge(&mut self, patch: ContextPatch) {
        let ContextPatch {
            selected_property,
            search_query,
            report_draft,
            payment_draft,
            otp_purpose,
            user,
        } = patch;

        if let Some(property) = selected_property {
            self.selected_property = Some(property);
        }
        if let Some(query) = search_query {
            self.search_query = query;
        }
        if let Some(draft) = report_draft {
            self.report_draft = Some(draft);
        }
        if let Some(draft) = payment_draft {
            self.payment_draft = Some(draft);
        }
        if let Some(purpose) = otp_purpose {
            self.otp_purpose = purpose;
        }
        if let Some(user) = user {
            self.user_draft.merge(user);
        }
    }

    /// Reset every field to its empty default.
    pub fn clear(&mut self) {
        *self = SessionContext::default();
    }

    /// Whether the context holds nothing.
    pub fn is_empty(&self) -> bool {
        *self == SessionContext::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loft() -> Property {
        Property {
            id: Some("p-1".into()),
            name: Some("Loft".into()),
            ..Property::default()
        }
    }

    #[test]
    fn merge_is_additive() {
        let mut ctx = SessionContext::default();
        ctx.merge(ContextPatch {
            search_query: Some("loft".into()),
            ..ContextPatch::default()
        });
        ctx.merge(ContextPatch {
            selected_property: Some(loft()),
            ..ContextPatch::default()
        });

        assert_eq!(ctx.search_query, "loft");
        assert_eq!(ctx.selected_property, Some(loft()));
    }

    #[test]
    fn search_only_patch_keeps_selected_property() {
        let mut ctx = SessionContext::default();
        ctx.merge(ContextPatch {
            selected_property: Some(loft()),
            ..ContextPatch::default()
        });
        ctx.merge(ContextPatch {
            search_query: Some("villa".into()),
            ..ContextPatch::default()
        });

        assert_eq!(ctx.selected_property, Some(loft()));
        assert_eq!(ctx.search_query, "villa");
    }

    #[test]
    fn payment_draft_is_replaced_whole() {
        let mut ctx = SessionContext::default();
        ctx.merge(ContextPatch {
            payment_draft: Some(PaymentDraft {
                property_id: Some("p-1".into()),
                property_name: Some("Loft".into()),
                property_price: Some("100".into()),
            }),
            ..ContextPatch::default()
        });
        ctx.merge(ContextPatch {
            payment_draft: Some(PaymentDraft {
                property_price: Some("250".into()),
                ..PaymentDraft::default()
            }),
            ..ContextPatch::default()
        });

        let draft = ctx.payment_draft.unwrap();
        assert_eq!(draft.property_price.as_deref(), Some("250"));
        assert!(draft.property_id.is_none());
        assert!(draft.property_name.is_none());
    }

    #[test]
    fn otp_purpose_can_be_set_and_cleared() {
        let mut ctx = SessionContext::default();
        ctx.merge(ContextPatch {
            otp_purpose: Some(Some(OtpPurpose::ForgotPassword)),
            ..ContextPatch::default()
        });
        assert_eq!(ctx.otp_purpose, Some(OtpPurpose::ForgotPassword));

        // Absent key leaves it alone
        ctx.merge(ContextPatch::default());
        assert_eq!(ctx.otp_purpose, Some(OtpPurpose::ForgotPassword));

        ctx.merge(ContextPatch {
            otp_purpose: Some(None),
            ..ContextPatch::default()
        });
        assert_eq!(ctx.otp_purpose, None);
    }

    #[test]
    fn user_patch_accumulates() {
        let mut ctx = SessionContext::default();
        ctx.merge(ContextPatch {
            user: Some(UserDraft {
                email: Some("a@example.com".into()),
                ..UserDraft::default()
            }),
            ..ContextPatch::default()
        });
        ctx.merge(ContextPatch {
            user: Some(UserDraft {
                role: Some("agent".into()),
                ..UserDraft::default()
            }),
            ..ContextPatch::default()
        });

        assert_eq!(ctx.user_draft.email.as_deref(), Some("a@example.com"));
        assert_eq!(ctx.user_draft.role.as_deref(), Some("agent"));
    }

    #[test]
    fn clear_restores_default() {
        let mut ctx = SessionContext::default();
        ctx.merge(ContextPatch {
            selected_property: Some(loft()),
            search_query: Some("loft".into()),
            report_draft: Some(ReportDraft::default()),
            otp_purpose: Some(Some(OtpPurpose::Registration)),
            ..ContextPatch::default()
        });
        assert!(!ctx.is_empty());

        ctx.clear();
        assert!(ctx.is_empty());
        assert_eq!(ctx, SessionContext::default());
    }
}
