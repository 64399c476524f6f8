//! Navigation params.
//!
//! Screens hand the controller a loose param object with every `navigate`
//! call. [`NavParams`] is the typed form; [`NavParams::from_json`] decodes the
//! loose form used across the FFI and JS boundaries.
//!
//! Listing keys (`propertyId`, `propertyName`, `propertyAddress`,
//! `propertyPrice`, `propertyImage`) become exactly one [`DraftParams`]
//! variant, picked by the navigation target. A payment navigation never
//! touches the report draft and vice versa.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::context::{ContextPatch, PaymentDraft, ReportDraft};
use crate::error::{Error, Result};
use crate::otp::OtpPurpose;
use crate::property::{Property, UserDraft};
use crate::screen::ScreenId;

/// Listing snapshot for one of the two draft-carrying screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftParams {
    /// Params for `reportProperty`.
    Report(ReportDraft),
    /// Params for `payment`.
    Payment(PaymentDraft),
}

/// Typed navigation params.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavParams {
    /// Listing to show.
    pub property: Option<Property>,
    /// Search text.
    pub search_query: Option<String>,
    /// Set or clear the OTP purpose.
    pub otp_purpose: Option<Option<OtpPurpose>>,
    /// User fields to accumulate.
    pub user: Option<UserDraft>,
    /// Report or payment draft.
    pub draft: Option<DraftParams>,
}

impl NavParams {
    /// Empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a listing.
    #[must_use]
    pub fn property(mut self, property: Property) -> Self {
        self.property = Some(property);
        self
    }

    /// Set the search text.
    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Tag the OTP visit.
    #[must_use]
    pub fn otp(mut self, purpose: OtpPurpose) -> Self {
        self.otp_purpose = Some(Some(purpose));
        self
    }

    /// Merge user fields.
    #[must_use]
    pub fn user(mut self, user: UserDraft) -> Self {
        self.user = Some(user);
        self
    }

    /// Carry a report draft.
    #[must_use]
    pub fn report(mut self, draft: ReportDraft) -> Self {
        self.draft = Some(DraftParams::Report(draft));
        self
    }

    /// Carry a payment draft.
    #[must_use]
    pub fn payment(mut self, draft: PaymentDraft) -> Self {
        self.draft = Some(DraftParams::Payment(draft));
        self
    }

    /// Decode loose params for a navigation to `target`.
    ///
    /// `null` decodes to empty params and anything other than an object is
    /// `InvalidParams`. Each known key is decoded on its own: a key with the
    /// wrong shape is dropped with a warning and its siblings still apply.
    /// Unknown keys are ignored.
    pub fn from_json(target: ScreenId, value: &Value) -> Result<NavParams> {
        match value {
            Value::Null => Ok(NavParams::default()),
            Value::Object(object) => Ok(RawParams::decode(object).into_params(target)),
            other => Err(Error::InvalidParams {
                reason: format!("expected an object, got {}", json_kind(other)),
            }),
        }
    }

    /// Split into the context update these params describe.
    pub fn into_patch(self) -> ContextPatch {
        let (report_draft, payment_draft) = match self.draft {
            Some(DraftParams::Report(draft)) => (Some(draft), None),
            Some(DraftParams::Payment(draft)) => (None, Some(draft)),
            None => (None, None),
        };
        ContextPatch {
            selected_property: self.property,
            search_query: self.search_query,
            report_draft,
            payment_draft,
            otp_purpose: self.otp_purpose,
            user: self.user,
        }
    }
}

/// Recognized keys of the loose param object.
#[derive(Debug, Default)]
struct RawParams {
    property: Option<Property>,
    search_query: Option<String>,
    otp_context: Option<String>,
    user: Option<UserDraft>,
    property_id: Option<String>,
    property_name: Option<String>,
    property_address: Option<String>,
    property_price: Option<String>,
    property_image: Option<String>,
}

impl RawParams {
    fn decode(object: &Map<String, Value>) -> Self {
        Self {
            property: field(object, &["property", "selectedProperty"]),
            search_query: field(object, &["searchQuery", "query"]),
            otp_context: field(object, &["otpContext", "otpPurpose"]),
            user: field(object, &["user", "userData"]),
            property_id: loose_string(object, "propertyId"),
            property_name: field(object, &["propertyName"]),
            property_address: field(object, &["propertyAddress"]),
            property_price: loose_string(object, "propertyPrice"),
            property_image: field(object, &["propertyImage"]),
        }
    }

    fn has_listing(&self) -> bool {
        self.property_id.is_some()
            || self.property_name.is_some()
            || self.property_address.is_some()
            || self.property_price.is_some()
            || self.property_image.is_some()
    }

    fn into_params(self, target: ScreenId) -> NavParams {
        let draft = if self.has_listing() {
            match target {
                ScreenId::ReportProperty => Some(DraftParams::Report(ReportDraft {
                    property_id: self.property_id,
                    property_name: self.property_name,
                    property_address: self.property_address,
                    property_price: self.property_price,
                    property_image: self.property_image,
                })),
                ScreenId::Payment => Some(DraftParams::Payment(PaymentDraft {
                    property_id: self.property_id,
                    property_name: self.property_name,
                    property_price: self.property_price,
                })),
                other => {
                    debug!(target_screen = %other, "listing params ignored for screen without a draft");
                    None
                }
            }
        } else {
            None
        };

        let otp_purpose = self.otp_context.and_then(|raw| {
            if raw.trim().is_empty() {
                return Some(None);
            }
            match raw.parse::<OtpPurpose>() {
                Ok(purpose) => Some(Some(purpose)),
                Err(()) => {
                    warn!(otp_context = %raw, "unrecognized OTP purpose ignored");
                    None
                }
            }
        });

        NavParams {
            property: self.property,
            search_query: self.search_query,
            otp_purpose,
            user: self.user,
            draft,
        }
    }
}

/// First non-null value among `keys` (a key and its aliases).
fn present<'a>(
    object: &'a Map<String, Value>,
    keys: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|&key| object.get(key).filter(|v| !v.is_null()).map(|v| (key, v)))
}

fn field<T: DeserializeOwned>(object: &Map<String, Value>, keys: &[&'static str]) -> Option<T> {
    let (key, value) = present(object, keys)?;
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(key, error = %e, "navigation param dropped");
            None
        }
    }
}

/// Ids and prices arrive as strings or numbers.
fn loose_string(object: &Map<String, Value>, key: &'static str) -> Option<String> {
    match present(object, &[key])?.1 {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => {
            warn!(key, got = json_kind(other), "navigation param dropped");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
