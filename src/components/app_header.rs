//! Header for signed-in pages: greeting and logout.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::services::session::SessionBootstrapper;
use crate::state::session::SessionState;

#[component]
pub fn AppHeader() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let bootstrapper = expect_context::<Arc<SessionBootstrapper>>();
    let navigate = use_navigate();
    let busy = RwSignal::new(false);

    let greeting = move || {
        session.with(|s| match s.greeting_name() {
            Some(name) if !name.is_empty() => format!("Welcome, {name}"),
            _ => "Welcome".to_owned(),
        })
    };

    let on_logout = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let bootstrapper = bootstrapper.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let go = move |to: &str| navigate(to, NavigateOptions::default());
            // Failures are logged by the bootstrapper; the user stays signed in.
            let _ = bootstrapper.logout(go, move |event| session.update(|s| s.apply(event))).await;
            busy.set(false);
        });
    };

    view! {
        <header class="app-header">
            <span class="app-header__brand">"TaskFlow"</span>
            <span class="app-header__spacer"></span>
            <span class="app-header__greeting">{greeting}</span>
            <button class="btn app-header__logout" on:click=on_logout disabled=move || busy.get()>
                "Logout"
            </button>
        </header>
    }
}
