//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided through Leptos context as `RwSignal<SessionState>`. Only the
//! session bootstrapper changes it, and only through [`SessionEvent`]s:
//!
//! - `Initialized`: the identity SDK answered; the UI may render routes.
//! - `SignedIn(user)`: a user is present.
//! - `SignedOut`: no user (startup without a session, or logout).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    /// False until the first identity callback; the shell shows a spinner.
    pub initialized: bool,
    pub is_authenticated: bool,
    pub user: Option<User>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Initialized,
    SignedIn(User),
    SignedOut,
}

impl SessionState {
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Initialized => self.initialized = true,
            SessionEvent::SignedIn(user) => {
                self.is_authenticated = true;
                self.user = Some(user);
            }
            SessionEvent::SignedOut => {
                self.is_authenticated = false;
                self.user = None;
            }
        }
    }

    /// Header greeting name, if signed in.
    #[must_use]
    pub fn greeting_name(&self) -> Option<&str> {
        self.user.as_ref().map(User::display_name)
    }
}
