//! Navigation and session controller.
//!
//! [`Controller`] is the single owner of the navigation stack, the session
//! context and the splash gate. Screens never touch those directly; every
//! change goes through one of the operations below and yields a
//! [`Transition`].
//!
//! # Flows
//!
//! ```text
//! splash --finish/tick--> welcome --> login ----complete_login----> role landing
//!                                 \-> register --> otp --verify--> role landing
//!                     forgotPassword --> otp --verify--> resetPassword --done--> login
//! any --reset_session--> welcome (context cleared)
//! ```
//!
//! Role landings clear history so back navigation cannot re-enter the auth
//! flow.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::context::SessionContext;
use crate::error::{Error, Result};
use crate::otp::{resolve_verification, OtpOutcome};
use crate::params::NavParams;
use crate::property::UserDraft;
use crate::props::ScreenProps;
use crate::routing::Role;
use crate::screen::ScreenId;
use crate::splash::{SplashExit, SplashGate, SplashState};
use crate::stack::{NavigationStack, Transition};

/// Serializable view of the controller for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Active screen.
    pub active: ScreenId,
    /// History, least recent first.
    pub history: Vec<ScreenId>,
    /// Whether back navigation has a history entry to return to.
    pub can_go_back: bool,
    /// Props of the active screen.
    pub props: ScreenProps,
}

/// Owner of all navigation and session state.
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControllerConfig,
    stack: NavigationStack,
    context: SessionContext,
    splash: SplashGate,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl Controller {
    /// Cold-start controller: `splash` active, empty history and context.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            stack: NavigationStack::new(ScreenId::Splash),
            context: SessionContext::default(),
            splash: SplashGate::new(),
        }
    }

    // ==================== Accessors ====================

    /// Configuration in use.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Active screen.
    pub fn active(&self) -> ScreenId {
        self.stack.active()
    }

    /// History, least recent first.
    pub fn history(&self) -> &[ScreenId] {
        self.stack.history()
    }

    /// Navigation stack.
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Session context.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Splash gate state.
    pub fn splash_state(&self) -> SplashState {
        self.splash.state()
    }

    /// Props for the active screen.
    pub fn props(&self) -> ScreenProps {
        ScreenProps::derive(self.stack.active(), &self.context)
    }

    /// Active screen, history and props in one value.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            active: self.stack.active(),
            history: self.stack.history().to_vec(),
            can_go_back: !self.stack.is_empty(),
            props: self.props(),
        }
    }

    // ==================== Navigation ====================

    /// Push `screen` and merge whatever `params` carry into the context.
    pub fn navigate(&mut self, screen: ScreenId, params: NavParams) -> Transition {
        let transition = self.stack.push(screen);
        let patch = params.into_patch();
        if !patch.is_empty() {
            self.context.merge(patch);
        }
        log_transition(&transition);
        transition
    }

    /// Navigate by screen name with loose JSON params.
    ///
    /// An unknown name pushes the unknown-screen fallback and drops the
    /// params. Params that fail to decode are dropped; the navigation still
    /// happens.
    pub fn navigate_named(&mut self, name: &str, params: &Value) -> Transition {
        let screen = match name.parse::<ScreenId>() {
            Ok(screen) => screen,
            Err(e) => {
                let fallback = self.config.unknown_screen_fallback;
                warn!(error = %e, fallback = %fallback, "navigation to unregistered screen");
                let transition = self.stack.push(fallback);
                log_transition(&transition);
                return transition;
            }
        };

        let params = NavParams::from_json(screen, params).unwrap_or_else(|e| {
            warn!(screen = %screen, error = %e, "navigation params dropped");
            NavParams::default()
        });
        self.navigate(screen, params)
    }

    /// Return to the previous screen, or the back fallback on empty history.
    pub fn go_back(&mut self) -> Transition {
        let transition = self.stack.pop(self.config.back_fallback);
        log_transition(&transition);
        transition
    }

    /// Merge params into the context without navigating.
    ///
    /// Used when a screen stores data for a later step (e.g. registration
    /// saving the user draft before requesting a code).
    pub fn merge_context(&mut self, params: NavParams) {
        self.context.merge(params.into_patch());
    }

    // ==================== Authentication ====================

    /// Handle a successful login response.
    ///
    /// Accepts `{ "user": {...} }` or a bare user object. Without a usable
    /// user the controller logs, changes nothing and returns `MissingUser`.
    pub fn complete_login(&mut self, response: &Value) -> Result<Transition> {
        let user_value = response.get("user").unwrap_or(response);
        if !user_value.is_object() {
            warn!("login response carried no user object");
            return Err(Error::MissingUser);
        }
        let user: UserDraft = serde_json::from_value(user_value.clone()).map_err(|e| {
            warn!(error = %e, "login user object malformed");
            Error::MissingUser
        })?;
        self.complete_login_with(user)
    }

    /// Typed variant of [`complete_login`](Self::complete_login).
    ///
    /// The user must carry an `id` or an `email`. The logged-in user replaces
    /// any draft left by an earlier registration, so the stored role always
    /// matches the landing screen.
    pub fn complete_login_with(&mut self, user: UserDraft) -> Result<Transition> {
        if !user.is_identified() {
            warn!("login user has neither id nor email");
            return Err(Error::MissingUser);
        }

        let role = Role::normalize(user.role.as_deref());
        self.context.user_draft = user;
        Ok(self.land_authenticated(role))
    }

    /// Handle a successful OTP verification.
    ///
    /// Password resets continue to `resetPassword` with history kept.
    /// Anything else, including an unset purpose, is treated as registration
    /// and lands on the role screen from the user draft.
    pub fn complete_otp_verification(&mut self) -> Transition {
        let purpose = self.context.otp_purpose;
        match resolve_verification(purpose, self.context.user_draft.role.as_deref()) {
            OtpOutcome::ResetPassword => {
                let transition = self.stack.push(ScreenId::ResetPassword);
                log_transition(&transition);
                transition
            }
            OtpOutcome::Authenticated { assumed, .. } => {
                if assumed {
                    warn!("OTP verified without a purpose, assuming registration");
                }
                let role = Role::normalize(self.context.user_draft.role.as_deref());
                self.land_authenticated(role)
            }
        }
    }

    /// Password changed: back to login with a fresh history.
    ///
    /// Clears the OTP purpose so the next code entry starts untagged.
    pub fn complete_password_reset(&mut self) -> Transition {
        self.context.otp_purpose = None;
        let transition = self.stack.reset_to(self.config.password_reset_destination);
        log_transition(&transition);
        transition
    }

    fn land_authenticated(&mut self, role: Role) -> Transition {
        let destination = role.landing_screen();
        info!(role = %role, destination = %destination, "authenticated, redirecting");
        let transition = self.stack.reset_to(destination);
        log_transition(&transition);
        transition
    }

    // ==================== Session Lifecycle ====================

    /// Logout: clear the context, then return to the logout destination.
    pub fn reset_session(&mut self) -> Transition {
        self.context.clear();
        self.splash.cancel();
        let transition = self.stack.reset_to(self.config.logout_destination);
        info!(destination = %transition.to, "session reset");
        log_transition(&transition);
        transition
    }

    // ==================== Splash ====================

    /// Show the splash and arm its fallback deadline.
    ///
    /// Returns a transition only if another screen was active.
    pub fn start_splash(&mut self, now_ms: u64) -> Option<Transition> {
        let transition = (self.stack.active() != ScreenId::Splash)
            .then(|| self.stack.reset_to(ScreenId::Splash));
        self.splash.reset();
        self.splash.start(now_ms, self.config.splash_timeout_ms);
        transition
    }

    /// The splash reported completion. Cancels the fallback, then advances.
    ///
    /// Off the splash the completion only cancels the fallback, so returning
    /// to the splash later cannot fire a stale deadline.
    pub fn finish_splash(&mut self) -> Option<Transition> {
        if self.stack.active() != ScreenId::Splash {
            debug!(active = %self.stack.active(), "splash completion ignored");
            self.splash.cancel();
            return None;
        }
        let exit = self.splash.complete()?;
        Some(self.leave_splash(exit))
    }

    /// Advance the clock; fires the fallback once its deadline has passed.
    pub fn tick(&mut self, now_ms: u64) -> Option<Transition> {
        let exit = self.splash.tick(now_ms)?;
        if self.stack.active() != ScreenId::Splash {
            debug!(active = %self.stack.active(), "splash timeout ignored");
            return None;
        }
        Some(self.leave_splash(exit))
    }

    fn leave_splash(&mut self, exit: SplashExit) -> Transition {
        let transition = self.stack.reset_to(self.config.splash_destination);
        debug!(exit = ?exit, to = %transition.to, "splash finished");
        transition
    }
}

fn log_transition(transition: &Transition) {
    debug!(
        from = %transition.from,
        to = %transition.to,
        kind = ?transition.kind,
        "navigation"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PaymentDraft;
    use crate::otp::OtpPurpose;
    use crate::property::Property;
    use crate::stack::TransitionKind;
    use serde_json::json;

    fn on(screen: ScreenId) -> Controller {
        let mut controller = Controller::default();
        controller.stack = NavigationStack::new(screen);
        controller
    }

    #[test]
    fn cold_start_is_splash() {
        let controller = Controller::default();
        assert_eq!(controller.active(), ScreenId::Splash);
        assert!(controller.history().is_empty());
        assert!(controller.context().is_empty());
        assert_eq!(controller.splash_state(), SplashState::Idle);
    }

    #[test]
    fn navigate_pushes_then_merges() {
        let mut controller = on(ScreenId::Home);
        let property = Property {
            id: Some("p-1".into()),
            ..Property::default()
        };

        let t = controller.navigate(
            ScreenId::PropertyDetail,
            NavParams::new().property(property.clone()),
        );

        assert_eq!(t.kind, TransitionKind::Push);
        assert_eq!(controller.history(), &[ScreenId::Home]);
        assert_eq!(controller.context().selected_property, Some(property.clone()));
        assert_eq!(
            controller.props(),
            ScreenProps::PropertyDetail {
                property: Some(property)
            }
        );
    }

    #[test]
    fn navigate_named_unknown_screen_falls_back_to_welcome() {
        let mut controller = on(ScreenId::Home);
        let t = controller.navigate_named("settings", &json!({ "searchQuery": "ignored" }));

        assert_eq!(t.to, ScreenId::Welcome);
        assert_eq!(controller.active(), ScreenId::Welcome);
        assert_eq!(controller.history(), &[ScreenId::Home]);
        assert_eq!(controller.context().search_query, "");
    }

    #[test]
    fn navigate_named_with_bad_params_still_navigates() {
        let mut controller = on(ScreenId::Home);
        controller.navigate_named("searchResults", &json!("loft"));

        assert_eq!(controller.active(), ScreenId::SearchResults);
        assert!(controller.context().is_empty());
    }

    #[test]
    fn go_back_on_empty_history_lands_home() {
        let mut controller = on(ScreenId::Profile);
        for _ in 0..3 {
            let t = controller.go_back();
            assert_eq!(t.to, ScreenId::Home);
            assert!(controller.history().is_empty());
        }
    }

    #[test]
    fn login_routes_by_response_role_and_clears_history() {
        let mut controller = on(ScreenId::Welcome);
        controller.navigate(ScreenId::Login, NavParams::new());

        let t = controller
            .complete_login(&json!({
                "token": "opaque",
                "user": { "id": "u-1", "name": "Dev", "email": "dev@example.com", "role": " Admin" }
            }))
            .unwrap();

        assert_eq!(t.to, ScreenId::AdminDashboard);
        assert_eq!(t.kind, TransitionKind::Reset);
        assert!(controller.history().is_empty());
        assert_eq!(controller.context().user_draft.name.as_deref(), Some("Dev"));
    }

    #[test]
    fn login_replaces_registration_draft() {
        let mut controller = on(ScreenId::Register);
        controller.merge_context(NavParams::new().user(UserDraft {
            name: Some("Alice".into()),
            role: Some("admin".into()),
            ..UserDraft::default()
        }));
        controller.navigate(ScreenId::Login, NavParams::new());

        let t = controller
            .complete_login(&json!({ "user": { "id": "u-2", "email": "b@example.com" } }))
            .unwrap();

        assert_eq!(t.to, ScreenId::Home);
        let user = &controller.context().user_draft;
        assert_eq!(user.role, None);
        assert_eq!(user.name, None);
        assert_eq!(user.id.as_deref(), Some("u-2"));
        assert_eq!(controller.props(), ScreenProps::Home { user_name: None });
    }

    #[test]
    fn login_with_non_string_role_lands_home() {
        let mut controller = on(ScreenId::Login);
        let t = controller
            .complete_login(&json!({ "user": { "id": "u-1", "role": 3 } }))
            .unwrap();

        assert_eq!(t.to, ScreenId::Home);
        assert_eq!(controller.context().user_draft.id.as_deref(), Some("u-1"));
    }

    #[test]
    fn login_accepts_bare_user_object() {
        let mut controller = on(ScreenId::Login);
        let t = controller
            .complete_login(&json!({ "email": "b@example.com" }))
            .unwrap();
        assert_eq!(t.to, ScreenId::Home);
    }

    #[test]
    fn login_without_user_changes_nothing() {
        let mut controller = on(ScreenId::Welcome);
        controller.navigate(ScreenId::Login, NavParams::new().search("x"));
        let before_stack = controller.stack().clone();
        let before_ctx = controller.context().clone();

        for response in [
            json!(null),
            json!({ "user": null }),
            json!({ "user": "u-1" }),
            json!({ "user": {} }),
            json!({ "user": { "name": "No Id" } }),
            json!({ "user": { "id": [1] } }),
        ] {
            assert_eq!(controller.complete_login(&response), Err(Error::MissingUser));
            assert_eq!(controller.stack(), &before_stack);
            assert_eq!(controller.context(), &before_ctx);
        }
    }

    #[test]
    fn otp_forgot_password_pushes_reset() {
        let mut controller = on(ScreenId::Login);
        controller.navigate(ScreenId::ForgotPassword, NavParams::new());
        controller.navigate(ScreenId::Otp, NavParams::new().otp(OtpPurpose::ForgotPassword));

        let t = controller.complete_otp_verification();
        assert_eq!(t.kind, TransitionKind::Push);
        assert_eq!(controller.active(), ScreenId::ResetPassword);
        assert_eq!(controller.history().last(), Some(&ScreenId::Otp));
    }

    #[test]
    fn otp_without_purpose_assumes_registration() {
        let mut controller = on(ScreenId::Register);
        controller.merge_context(NavParams::new().user(UserDraft {
            role: Some("builder".into()),
            ..UserDraft::default()
        }));
        controller.navigate(ScreenId::Otp, NavParams::new());

        let t = controller.complete_otp_verification();
        assert_eq!(t.to, ScreenId::BuilderDashboard);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn password_reset_returns_to_login() {
        let mut controller = on(ScreenId::ForgotPassword);
        controller.navigate(ScreenId::Otp, NavParams::new().otp(OtpPurpose::ForgotPassword));
        controller.complete_otp_verification();

        let t = controller.complete_password_reset();
        assert_eq!(t.to, ScreenId::Login);
        assert!(controller.history().is_empty());
        assert_eq!(controller.context().otp_purpose, None);
    }

    #[test]
    fn reset_session_clears_everything() {
        let mut controller = on(ScreenId::Home);
        controller.navigate(ScreenId::SearchResults, NavParams::new().search("loft"));
        controller.navigate(
            ScreenId::Payment,
            NavParams::new().payment(PaymentDraft {
                property_price: Some("10".into()),
                ..PaymentDraft::default()
            }),
        );

        let t = controller.reset_session();
        assert_eq!(t.to, ScreenId::Welcome);
        assert!(controller.history().is_empty());
        assert_eq!(controller.context(), &SessionContext::default());
    }

    /// Captures formatted log output for the duration of `f`.
    fn captured_logs(f: impl FnOnce()) -> String {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl Write for Buffer {
            fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(bytes);
                Ok(bytes.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn reset_session_logs_its_transition() {
        let mut controller = on(ScreenId::Home);
        controller.navigate(ScreenId::Profile, NavParams::new());

        let logs = captured_logs(|| {
            controller.reset_session();
        });

        let line = logs
            .lines()
            .find(|l| l.contains("navigation"))
            .unwrap_or_else(|| panic!("no navigation record in {logs:?}"));
        assert!(line.contains("from=profile"), "{line}");
        assert!(line.contains("to=welcome"), "{line}");
        assert!(line.contains("kind=Reset"), "{line}");
    }

    #[test]
    fn splash_completion_cancels_timeout() {
        let mut controller = Controller::default();
        assert_eq!(controller.start_splash(0), None);

        assert_eq!(controller.tick(100), None);
        let t = controller.finish_splash().unwrap();
        assert_eq!(t.to, ScreenId::Welcome);

        assert_eq!(controller.tick(5_000), None);
        assert_eq!(controller.finish_splash(), None);
        assert_eq!(controller.active(), ScreenId::Welcome);
    }

    #[test]
    fn splash_timeout_advances_without_clearing_context() {
        let mut controller = Controller::default();
        controller.merge_context(NavParams::new().search("kept"));
        controller.start_splash(1_000);

        assert_eq!(controller.tick(5_999), None);
        let t = controller.tick(6_000).unwrap();
        assert_eq!(t.to, ScreenId::Welcome);
        assert_eq!(controller.context().search_query, "kept");
    }

    #[test]
    fn splash_timeout_after_leaving_splash_is_ignored() {
        let mut controller = Controller::default();
        controller.start_splash(0);
        controller.navigate(ScreenId::Login, NavParams::new());

        assert_eq!(controller.tick(10_000), None);
        assert_eq!(controller.active(), ScreenId::Login);
    }

    #[test]
    fn completion_off_splash_disarms_the_fallback() {
        let mut controller = Controller::default();
        controller.start_splash(0);
        controller.navigate(ScreenId::Login, NavParams::new());

        assert_eq!(controller.finish_splash(), None);
        assert_eq!(controller.splash_state(), SplashState::Done);

        controller.go_back();
        assert_eq!(controller.active(), ScreenId::Splash);
        assert_eq!(controller.tick(10_000), None);
        assert_eq!(controller.active(), ScreenId::Splash);
    }

    #[test]
    fn otp_with_bad_sibling_param_still_resets_password() {
        let mut controller = on(ScreenId::ForgotPassword);
        controller.navigate_named("otp", &json!({ "otpContext": "forgotPassword", "searchQuery": 5 }));
        assert_eq!(controller.context().otp_purpose, Some(OtpPurpose::ForgotPassword));

        let t = controller.complete_otp_verification();
        assert_eq!(t.to, ScreenId::ResetPassword);
        assert_eq!(controller.history(), &[ScreenId::ForgotPassword, ScreenId::Otp]);
    }

    #[test]
    fn start_splash_from_other_screen_resets() {
        let mut controller = on(ScreenId::Home);
        let t = controller.start_splash(0).unwrap();
        assert_eq!(t.to, ScreenId::Splash);
        assert!(controller.splash_state() != SplashState::Idle);
    }

    #[test]
    fn snapshot_serializes() {
        let mut controller = on(ScreenId::Home);
        controller.navigate(ScreenId::SearchResults, NavParams::new().search("loft"));

        let value = serde_json::to_value(controller.snapshot()).unwrap();
        assert_eq!(
            value,
            json!({
                "active": "searchResults",
                "history": ["home"],
                "canGoBack": true,
                "props": { "screen": "searchResults", "query": "loft" }
            })
        );
    }
}
