//! Hosted sign-in pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity SDK draws every auth screen itself. Each page here renders
//! the mount point and, once it is in the DOM, asks the SDK for the matching
//! surface. Route params are passed through untouched.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::config::AppConfig;
use crate::net::identity::AuthSurface;
use crate::services::session::SessionBootstrapper;

/// Mount point plus a one-shot request for `surface`.
#[component]
fn HostedSurface(surface: AuthSurface) -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let bootstrapper = expect_context::<Arc<SessionBootstrapper>>();
    let mount_id = config.auth_target.trim_start_matches('#').to_owned();

    Effect::new(move || bootstrapper.show_surface(&surface));

    view! {
        <div class="auth-page">
            <div class="auth-page__card">
                <div id=mount_id class="auth-page__mount"></div>
            </div>
        </div>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <HostedSurface surface=AuthSurface::Login/> }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    view! { <HostedSurface surface=AuthSurface::Signup/> }
}

#[component]
pub fn CallbackPage() -> impl IntoView {
    view! { <HostedSurface surface=AuthSurface::Callback/> }
}

/// `/error?message=...`; nothing is shown by the SDK here.
#[component]
pub fn ErrorPage() -> impl IntoView {
    let query = use_query_map();
    let message = move || {
        query
            .with(|q| q.get("message"))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "An error occurred during authentication.".to_owned())
    };

    view! {
        <div class="auth-page">
            <div class="auth-page__card auth-page__card--error">
                <h1>"Authentication Error"</h1>
                <p class="auth-page__message">{message}</p>
                <a class="btn" href="/login">"Back to login"</a>
            </div>
        </div>
    }
}

#[component]
pub fn PromptPasswordPage() -> impl IntoView {
    let params = use_params_map();
    let surface = params.with_untracked(|p| AuthSurface::PromptPassword {
        app_id: p.get("appId").unwrap_or_default(),
        email_address: p.get("emailAddress").unwrap_or_default(),
        provider: p.get("provider").unwrap_or_default(),
    });
    view! { <HostedSurface surface=surface/> }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let params = use_params_map();
    let surface = params.with_untracked(|p| AuthSurface::ResetPassword {
        app_id: p.get("appId").unwrap_or_default(),
        fields: p.get("fields").unwrap_or_default(),
    });
    view! { <HostedSurface surface=surface/> }
}
