//! Estate Core - navigation and session-state controller for the Estate
//! property listing app.
//!
//! This library owns everything the app's screens share:
//! - A single linear navigation history with an active screen
//! - Transient session payloads (selected listing, search text, report and
//!   payment drafts, OTP purpose, user draft)
//! - Role-based redirect after login and after OTP verification
//! - The splash fallback timer, driven by a host-supplied clock
//!
//! # Constraints
//!
//! This library intentionally does NOT:
//! - Access the network
//! - Perform file or storage I/O
//! - Own threads or timers (hosts drive the clock)
//! - Log user PII (names, emails, phone numbers)
//!
//! # Example: Registration Through OTP
//!
//! ```
//! use estate_core::{Controller, NavParams, OtpPurpose, ScreenId, UserDraft};
//!
//! let mut nav = Controller::default();
//! nav.finish_splash();
//! assert_eq!(nav.active(), ScreenId::Welcome);
//!
//! nav.navigate(ScreenId::Register, NavParams::new());
//!
//! // Registration succeeded: keep the user and ask for the code
//! let user = UserDraft {
//!     email: Some("agent@example.com".into()),
//!     role: Some("agent".into()),
//!     ..UserDraft::default()
//! };
//! nav.navigate(
//!     ScreenId::Otp,
//!     NavParams::new().user(user).otp(OtpPurpose::Registration),
//! );
//!
//! // Code verified: history is cleared and the agent lands on their dashboard
//! nav.complete_otp_verification();
//! assert_eq!(nav.active(), ScreenId::AgentDashboard);
//! assert!(nav.history().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod otp;
pub mod params;
pub mod property;
pub mod props;
pub mod routing;
pub mod screen;
pub mod splash;
pub mod stack;

// Re-export main types at crate root
pub use config::ControllerConfig;
pub use context::{ContextPatch, PaymentDraft, ReportDraft, SessionContext};
pub use controller::{Controller, Snapshot};
pub use error::{Error, Result};
pub use otp::{resolve_verification, OtpOutcome, OtpPurpose};
pub use params::{DraftParams, NavParams};
pub use property::{Property, UserDraft};
pub use props::ScreenProps;
pub use routing::{route_for_role, Role};
pub use screen::ScreenId;
pub use splash::{SplashExit, SplashGate, SplashState, DEFAULT_SPLASH_TIMEOUT_MS};
pub use stack::{NavigationStack, Transition, TransitionKind};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
