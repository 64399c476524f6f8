//! Listing and user records carried between screens.
//!
//! These come from the REST API via the screens, so decoding is lenient:
//! ids, prices and phone numbers arrive as either JSON strings or numbers
//! and are held as strings. Unknown listing keys are preserved.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A property listing as passed around by screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Listing id (`id` or `_id`).
    #[serde(default, alias = "_id", deserialize_with = "lenient::string")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, alias = "title", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Street address or locality.
    #[serde(default, alias = "location", deserialize_with = "lenient::text")]
    pub address: Option<String>,
    /// Asking price, as displayed.
    #[serde(default, deserialize_with = "lenient::string")]
    pub price: Option<String>,
    /// Cover image URL.
    #[serde(default, alias = "imageUrl", deserialize_with = "lenient::text")]
    pub image: Option<String>,
    /// Every other listing field, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User fields accumulated across register, login and OTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    /// Display name.
    #[serde(default, alias = "fullName", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(
        default,
        alias = "phoneNumber",
        alias = "mobile",
        deserialize_with = "lenient::string"
    )]
    pub phone: Option<String>,
    /// Raw role as sent by the API. Normalized only when routing.
    #[serde(default, deserialize_with = "lenient::text")]
    pub role: Option<String>,
    /// Account id (`id` or `_id`).
    #[serde(default, alias = "_id", deserialize_with = "lenient::string")]
    pub id: Option<String>,
}

impl UserDraft {
    /// Overwrite fields that `other` provides; keep the rest.
    pub fn merge(&mut self, other: UserDraft) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.email.is_some() {
            self.email = other.email;
        }
        if other.phone.is_some() {
            self.phone = other.phone;
        }
        if other.role.is_some() {
            self.role = other.role;
        }
        if other.id.is_some() {
            self.id = other.id;
        }
    }

    /// Whether the draft identifies an account.
    pub fn is_identified(&self) -> bool {
        self.id.is_some() || self.email.is_some()
    }

    /// Whether no field has been set.
    pub fn is_empty(&self) -> bool {
        *self == UserDraft::default()
    }
}

mod lenient {
    use super::*;

    /// Accept a string, a number, or null.
    pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Accept a string; anything else reads as absent.
    pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }
}
