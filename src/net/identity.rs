//! Identity capability: the hosted sign-in SDK.
//!
//! The SDK owns the sign-in UI and the session cookie. The app only registers
//! callbacks once at startup, asks it to show a hosted surface on the auth
//! pages, and calls `logout`.

use serde::Serialize;

use super::types::User;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity sdk unavailable: {0}")]
    Unavailable(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("logout failed: {0}")]
    Logout(String),
}

/// `view` option of `setup`: the SDK may offer both login and signup.
pub const SETUP_VIEW: &str = "both";

/// Options passed to the SDK's `setup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySetup {
    pub target: String,
    pub client_id: String,
    pub view: String,
}

/// Hosted surface to render into the auth mount point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthSurface {
    Login,
    Signup,
    Callback,
    Error,
    PromptPassword { app_id: String, email_address: String, provider: String },
    ResetPassword { app_id: String, fields: String },
}

pub type SuccessCallback = Box<dyn Fn(Option<User>)>;
pub type ErrorCallback = Box<dyn Fn(IdentityError)>;

#[async_trait::async_trait(?Send)]
pub trait IdentityProvider: Send + Sync {
    /// Register with the SDK. `on_success` receives `None` when the visitor is
    /// not signed in; `on_error` fires when the SDK itself fails.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] if the SDK could not be reached at all.
    fn setup(
        &self,
        options: &IdentitySetup,
        on_success: SuccessCallback,
        on_error: ErrorCallback,
    ) -> Result<(), IdentityError>;

    /// Render a hosted surface into `target`.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] if the SDK could not be reached.
    fn show_surface(&self, target: &str, surface: &AuthSurface) -> Result<(), IdentityError>;

    /// End the SDK session.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Logout`] when the SDK rejects the logout.
    async fn logout(&self) -> Result<(), IdentityError>;
}
