//! Session bootstrap: one identity registration per page load.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity SDK reports the visitor exactly once after `setup`. The
//! bootstrapper turns that report into a route decision plus session events;
//! the app shell applies both. Routing itself is pure (`util::auth`), so the
//! only thing this module adds is the ordering:
//!
//! 1. `Initialized` (the shell drops its spinner)
//! 2. navigation, if any
//! 3. `SignedIn` / `SignedOut`

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::AppConfig;
use crate::net::identity::{AuthSurface, IdentityError, IdentityProvider, IdentitySetup, SETUP_VIEW};
use crate::net::types::User;
use crate::state::session::SessionEvent;
use crate::util::auth::{LOGIN_PATH, Location, RouteDecision, route_for_signed_in, route_for_signed_out};

/// Route decision and session event for one identity report.
#[must_use]
pub fn settle(location: &Location, user: Option<User>) -> (RouteDecision, SessionEvent) {
    match user {
        Some(user) => (route_for_signed_in(location), SessionEvent::SignedIn(user)),
        None => (route_for_signed_out(location), SessionEvent::SignedOut),
    }
}

pub struct SessionBootstrapper {
    identity: Arc<dyn IdentityProvider>,
    config: AppConfig,
    registered: AtomicBool,
}

impl SessionBootstrapper {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, config: AppConfig) -> Self {
        Self { identity, config, registered: AtomicBool::new(false) }
    }

    /// Register with the identity SDK. Later calls are ignored.
    ///
    /// `location` is captured now; the SDK may answer after the router has
    /// already moved, and the decision must use the page the visitor opened.
    pub fn start<N, S>(&self, location: Location, navigate: N, on_session: S)
    where
        N: Fn(&str) + 'static,
        S: Fn(SessionEvent) + Clone + 'static,
    {
        if self.registered.swap(true, Ordering::SeqCst) {
            log::debug!("identity already registered; ignoring start");
            return;
        }

        let options = IdentitySetup {
            target: self.config.auth_target.clone(),
            client_id: self.config.project_id.clone(),
            view: SETUP_VIEW.to_owned(),
        };

        let session_ok = on_session.clone();
        let on_success = Box::new(move |user: Option<User>| {
            let (decision, event) = settle(&location, user);
            session_ok(SessionEvent::Initialized);
            if let RouteDecision::Navigate(to) = decision {
                log::debug!("identity settled; navigating to {to}");
                navigate(&to);
            }
            session_ok(event);
        });

        let session_err = on_session.clone();
        let on_error = Box::new(move |err: IdentityError| {
            log::error!("identity callback failed: {err}");
            session_err(SessionEvent::Initialized);
        });

        if let Err(e) = self.identity.setup(&options, on_success, on_error) {
            log::error!("identity setup failed: {e}");
            on_session(SessionEvent::Initialized);
        }
    }

    /// Ask the SDK to render `surface` into the auth mount point.
    pub fn show_surface(&self, surface: &AuthSurface) {
        if let Err(e) = self.identity.show_surface(&self.config.auth_target, surface) {
            log::error!("failed to show {surface:?}: {e}");
        }
    }

    /// End the session, clear it and go to the login page.
    ///
    /// # Errors
    ///
    /// Returns the SDK's [`IdentityError`]; the session is left unchanged.
    pub async fn logout<N, S>(&self, navigate: N, on_session: S) -> Result<(), IdentityError>
    where
        N: Fn(&str),
        S: Fn(SessionEvent),
    {
        self.identity
            .logout()
            .await
            .inspect_err(|e| log::error!("logout failed: {e}"))?;
        on_session(SessionEvent::SignedOut);
        navigate(LOGIN_PATH);
        Ok(())
    }
}
