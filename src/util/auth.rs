//! Redirect decisions taken when the identity SDK reports the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session bootstrapper asks this module where the browser should go once
//! the SDK says whether a user is signed in. Decisions are pure functions of
//! the [`Location`] captured at startup so every branch is unit-testable.
//!
//! Auth-flow paths (login, signup, callback, error, prompt-password,
//! reset-password) are exempt from the default "send to login" rule.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REDIRECT_PARAM: &str = "redirect";

/// Route dedicated to the sign-in flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthRoute {
    Login,
    Signup,
    Callback,
    Error,
    PromptPassword,
    ResetPassword,
}

impl AuthRoute {
    pub const ALL: [Self; 6] = [
        Self::Login,
        Self::Signup,
        Self::Callback,
        Self::Error,
        Self::PromptPassword,
        Self::ResetPassword,
    ];

    /// First path segment that identifies the route.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Callback => "callback",
            Self::Error => "error",
            Self::PromptPassword => "prompt-password",
            Self::ResetPassword => "reset-password",
        }
    }

    /// Classify a path (query and fragment ignored) by its first segment.
    #[must_use]
    pub fn classify(path: &str) -> Option<Self> {
        let pathname = path.split(['?', '#']).next().unwrap_or_default();
        let first = pathname.trim_start_matches('/').split('/').next()?;
        Self::ALL.into_iter().find(|route| route.segment() == first)
    }
}

/// Browser location captured when the bootstrapper registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    #[must_use]
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        let pathname = pathname.into();
        let pathname = if pathname.is_empty() { ROOT_PATH.to_owned() } else { pathname };
        let search = search.into();
        let search = if search.is_empty() || search.starts_with('?') { search } else { format!("?{search}") };
        Self { pathname, search }
    }

    /// Split an in-app path such as `/login?redirect=/tasks/5`.
    #[cfg(test)]
    pub(crate) fn parse(path: &str) -> Self {
        let path = path.split('#').next().unwrap_or_default();
        match path.split_once('?') {
            Some((pathname, query)) if !query.is_empty() => Self::new(pathname, format!("?{query}")),
            Some((pathname, _)) => Self::new(pathname, ""),
            None => Self::new(path, ""),
        }
    }

    /// Path plus query string, as the app would navigate to it.
    #[must_use]
    pub fn current_path(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    #[must_use]
    pub fn auth_route(&self) -> Option<AuthRoute> {
        AuthRoute::classify(&self.pathname)
    }

    /// First decoded value of query parameter `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.search.trim_start_matches('?');
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Decoded `redirect` query parameter, if present and an in-app path.
    #[must_use]
    pub fn redirect_param(&self) -> Option<String> {
        self.query_param(REDIRECT_PARAM).filter(|target| is_in_app_path(target))
    }
}

/// Only same-origin absolute paths are honored as redirect targets.
fn is_in_app_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//")
}

/// Where the browser should go after the identity callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Leave the current location as it is.
    Stay,
    Navigate(String),
}

/// Build `{page}?redirect={target}` with the target query-encoded.
#[must_use]
pub fn with_redirect(page: &str, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("{page}?{REDIRECT_PARAM}={encoded}")
}

/// Decision for a callback that carries a signed-in user.
#[must_use]
pub fn route_for_signed_in(location: &Location) -> RouteDecision {
    if let Some(target) = location.redirect_param() {
        return RouteDecision::Navigate(target);
    }
    match location.auth_route() {
        // Re-navigating to the current page is a no-op.
        None => RouteDecision::Stay,
        Some(_) => RouteDecision::Navigate(ROOT_PATH.to_owned()),
    }
}

/// Decision for a callback that reports no signed-in user.
#[must_use]
pub fn route_for_signed_out(location: &Location) -> RouteDecision {
    match (location.auth_route(), location.redirect_param()) {
        (None, _) => RouteDecision::Navigate(login_for(&location.current_path())),
        (Some(_), Some(target)) => {
            if AuthRoute::classify(&target).is_some() {
                RouteDecision::Stay
            } else {
                RouteDecision::Navigate(with_redirect(LOGIN_PATH, &target))
            }
        }
        (Some(_), None) => RouteDecision::Stay,
    }
}

/// Login surface for a visitor who tried to open `intended`, a path outside
/// the auth flow. Signup paths never get here: they classify as auth routes.
fn login_for(intended: &str) -> String {
    if intended == ROOT_PATH {
        LOGIN_PATH.to_owned()
    } else {
        with_redirect(LOGIN_PATH, intended)
    }
}
