//! # taskflow
//!
//! Leptos + WASM task manager backed by a hosted identity and record-store
//! SDK. The app never talks to a backend of its own: sign-in UI and sessions
//! belong to the identity SDK, and every task and category lives in the
//! remote record store.
//!
//! Both SDKs sit behind capability traits (`net::identity`, `net::store`) so
//! the session bootstrapper and the record facades in `services` run natively
//! under test with mocks.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
