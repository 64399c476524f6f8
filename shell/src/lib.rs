//! # Estate Shell
//!
//! Native host for the Estate navigation controller.
//!
//! ## Design Principles
//!
//! - **One owner**: a single task owns the controller; screens only send events
//! - **Serialized transitions**: UI events and the splash timer share one queue
//! - **Host clock**: the splash fallback is a tokio timer, so tests can pause time
//! - **Minimal logging**: screen names and event kinds only, never user details
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  UiEvent   ┌─────────────┐  Snapshot  ┌─────────────┐
//! │   Screens   │───────────▶│ Event loop  │───────────▶│  Renderer   │
//! └─────────────┘            └──────┬──────┘            └─────────────┘
//!                                   │
//!                            ┌──────┴──────┐
//!                            │             │
//!                        Controller   Splash timer
//! ```
//!
//! ## Events
//!
//! | Event | Controller operation |
//! |-------|----------------------|
//! | `navigate` | `navigate_named` |
//! | `back` | `go_back` |
//! | `loginSucceeded` | `complete_login` |
//! | `otpVerified` | `complete_otp_verification` |
//! | `passwordResetDone` | `complete_password_reset` |
//! | `logout` | `reset_session` |
//! | `splashComplete` | `finish_splash` |

pub mod config;
pub mod events;
pub mod runtime;

pub use config::Config;
pub use events::{load_script, parse_script, ScriptError, ScriptStep, ShellEvent, UiEvent};
pub use runtime::{spawn, ShellError, ShellHandle};
