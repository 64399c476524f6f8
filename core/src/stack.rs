//! Stack navigator.
//!
//! One linear history plus the active screen. The active screen is never
//! stored inside the history itself.
//!
//! ```text
//! history: [welcome, login]      active: otp
//!   push(resetPassword)  ->  [welcome, login, otp]   resetPassword
//!   pop()                ->  [welcome, login]        otp
//!   reset_to(home)       ->  []                      home
//! ```

use serde::Serialize;

use crate::screen::ScreenId;

/// How the active screen changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionKind {
    /// Forward navigation; previous screen kept in history.
    Push,
    /// Back navigation to the previous history entry.
    Pop,
    /// Back navigation on an empty history, resolved to the fallback screen.
    Fallback,
    /// History cleared and a new root set.
    Reset,
}

/// One change of the active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Screen that was active before.
    pub from: ScreenId,
    /// Screen that is active now.
    pub to: ScreenId,
    /// Which operation produced the change.
    pub kind: TransitionKind,
}

/// Navigation history and active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    history: Vec<ScreenId>,
    active: ScreenId,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(ScreenId::Splash)
    }
}

impl NavigationStack {
    /// Create an empty stack with `root` active.
    pub fn new(root: ScreenId) -> Self {
        Self {
            history: Vec::new(),
            active: root,
        }
    }

    /// Currently active screen.
    #[inline]
    pub fn active(&self) -> ScreenId {
        self.active
    }

    /// Prior screens, least recent first.
    #[inline]
    pub fn history(&self) -> &[ScreenId] {
        &self.history
    }

    /// Number of screens in history.
    #[inline]
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Whether back navigation would hit the fallback.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Move the active screen into history and activate `screen`.
    pub fn push(&mut self, screen: ScreenId) -> Transition {
        let from = self.active;
        self.history.push(from);
        self.active = screen;
        Transition {
            from,
            to: screen,
            kind: TransitionKind::Push,
        }
    }

    /// Return to the most recent history entry.
    ///
    /// With an empty history the stack activates `fallback` and stays empty.
    pub fn pop(&mut self, fallback: ScreenId) -> Transition {
        let from = self.active;
        match self.history.pop() {
            Some(previous) => {
                self.active = previous;
                Transition {
                    from,
                    to: previous,
                    kind: TransitionKind::Pop,
                }
            }
            None => {
                self.active = fallback;
                Transition {
                    from,
                    to: fallback,
                    kind: TransitionKind::Fallback,
                }
            }
        }
    }

    /// Drop all history and activate `screen`.
    pub fn reset_to(&mut self, screen: ScreenId) -> Transition {
        let from = self.active;
        self.history.clear();
        self.active = screen;
        Transition {
            from,
            to: screen,
            kind: TransitionKind::Reset,
        }
    }
}
