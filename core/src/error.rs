//! Error types for estate-core.
//!
//! The controller itself never fails a navigation: every variant here is
//! either caught inside the controller and degraded to a safe default, or
//! returned to a caller that is expected to re-prompt the user.
//!
//! # Error Categories
//!
//! - **Registry errors**: `UnknownScreen`
//! - **Auth errors**: `MissingUser`
//! - **Param errors**: `InvalidParams`

/// Result type alias for estate-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during estate-core operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ==================== Registry Errors ====================
    /// Screen name is not part of the screen registry.
    ///
    /// The controller recovers by navigating to the unknown-screen fallback.
    #[error("unknown screen: {name:?}")]
    UnknownScreen {
        /// The name that failed to parse (as received, untrimmed).
        name: String,
    },

    // ==================== Auth Errors ====================
    /// Login response carried no usable user object.
    ///
    /// The controller leaves its state untouched so the caller can re-prompt.
    #[error("login response has no usable user object")]
    MissingUser,

    // ==================== Param Errors ====================
    /// Navigation params could not be decoded.
    #[error("invalid navigation params: {reason}")]
    InvalidParams {
        /// Description of what's wrong.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = Error::UnknownScreen {
            name: "settings".to_string(),
        };
        assert_eq!(err.to_string(), "unknown screen: \"settings\"");

        let err = Error::MissingUser;
        assert_eq!(err.to_string(), "login response has no usable user object");

        let err = Error::InvalidParams {
            reason: "expected an object".to_string(),
        };
        assert!(err.to_string().contains("expected an object"));
    }

    #[test]
    fn error_implements_std_error() {
        let err = Error::MissingUser;
        let _: &dyn std::error::Error = &err;
    }
}
