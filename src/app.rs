//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::components::app_header::AppHeader;
use crate::components::loading::LoadingScreen;
use crate::components::notice_stack::NoticeStack;
use crate::config::AppConfig;
use crate::net::sdk::{SdkIdentity, SdkRecordStore};
use crate::pages::auth::{CallbackPage, ErrorPage, LoginPage, PromptPasswordPage, ResetPasswordPage, SignupPage};
use crate::pages::tasks::TasksPage;
use crate::services::Services;
use crate::services::session::SessionBootstrapper;
use crate::state::notices::NoticeState;
use crate::state::session::SessionState;
use crate::util::auth::Location;

/// Root application component.
///
/// Falls back to a static error screen when the build was not configured.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    match AppConfig::from_build_env() {
        Ok(config) => view! { <Shell config=config/> }.into_any(),
        Err(e) => {
            log::error!("configuration error: {e}");
            view! { <ConfigErrorScreen message=e.to_string()/> }.into_any()
        }
    }
}

#[component]
fn ConfigErrorScreen(message: String) -> impl IntoView {
    view! {
        <Title text="TaskFlow"/>
        <div class="config-error">
            <h1>"TaskFlow is not configured"</h1>
            <p class="config-error__message">{message}</p>
        </div>
    }
}

/// Provides all shared contexts and sets up client-side routing.
#[component]
fn Shell(config: AppConfig) -> impl IntoView {
    let session = RwSignal::new(SessionState::default());
    let notices = RwSignal::new(NoticeState::with_timeout(config.notice_timeout_ms));
    let services = Services::new(Arc::new(SdkRecordStore::new(config.clone())), Arc::new(notices));
    let bootstrapper = Arc::new(SessionBootstrapper::new(
        Arc::new(SdkIdentity::new(config.clone())),
        config.clone(),
    ));

    provide_context(config);
    provide_context(session);
    provide_context(notices);
    provide_context(services);
    provide_context(bootstrapper);

    view! {
        <Title text="TaskFlow"/>

        <Router>
            <SessionBootstrap/>
            <Show
                when=move || session.with(|s| s.initialized)
                fallback=|| view! { <LoadingScreen/> }
            >
                <Show when=move || session.with(|s| s.is_authenticated)>
                    <AppHeader/>
                </Show>
                <Routes fallback=|| view! { <HomeOrLogin/> }>
                    <Route path=StaticSegment("") view=HomeOrLogin/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("callback") view=CallbackPage/>
                    <Route path=StaticSegment("error") view=ErrorPage/>
                    <Route
                        path=(
                            StaticSegment("prompt-password"),
                            ParamSegment("appId"),
                            ParamSegment("emailAddress"),
                            ParamSegment("provider"),
                        )
                        view=PromptPasswordPage
                    />
                    <Route
                        path=(StaticSegment("reset-password"), ParamSegment("appId"), ParamSegment("fields"))
                        view=ResetPasswordPage
                    />
                </Routes>
            </Show>
            <NoticeStack/>
        </Router>
    }
}

/// Registers the session once the router is available.
#[component]
fn SessionBootstrap() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let bootstrapper = expect_context::<Arc<SessionBootstrapper>>();
    let navigate = use_navigate();
    let location = use_location();

    let opened = Location::new(location.pathname.get_untracked(), location.search.get_untracked());
    bootstrapper.start(
        opened,
        move |to: &str| navigate(to, NavigateOptions::default()),
        move |event| session.update(|s| s.apply(event)),
    );
}

/// `/` and unknown paths: tasks when signed in, otherwise the login surface.
#[component]
fn HomeOrLogin() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    view! {
        <Show when=move || session.with(|s| s.is_authenticated) fallback=|| view! { <LoginPage/> }>
            <TasksPage/>
        </Show>
    }
}
