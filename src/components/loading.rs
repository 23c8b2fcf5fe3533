//! Full-screen spinner shown until the identity SDK first answers.

use leptos::prelude::*;

#[component]
pub fn LoadingScreen(#[prop(into, default = "Loading...".into())] label: String) -> impl IntoView {
    view! {
        <div class="loading-screen" aria-busy="true">
            <span class="loading-screen__spinner" aria-hidden="true"></span>
            <p class="loading-screen__label">{label}</p>
        </div>
    }
}
