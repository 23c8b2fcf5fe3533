//! Top-right notice stack.
//!
//! DESIGN
//! ======
//! Rendering is a plain projection of `NoticeState`. A polling loop advances
//! countdowns every [`TICK_MS`]; window blur/focus pause and resume all of
//! them, hover pauses a single notice.

use leptos::prelude::*;

use crate::state::notices::NoticeState;

/// Countdown resolution.
pub const TICK_MS: u32 = 100;

#[component]
pub fn NoticeStack() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    #[cfg(feature = "csr")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(TICK_MS))).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if notices.with_untracked(|n| n.items.is_empty()) {
                    continue;
                }
                notices.update(|n| n.tick(TICK_MS));
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));

        let _ = window_event_listener(leptos::ev::blur, move |_| notices.update(NoticeState::pause_all));
        let _ = window_event_listener(leptos::ev::focus, move |_| notices.update(NoticeState::resume_all));
    }

    view! {
        <div class="notice-stack" role="status" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|notice| notice.id
                let:notice
            >
                {
                    let id = notice.id;
                    view! {
                        <div
                            class=format!("notice {}", notice.level.css_modifier())
                            on:click=move |_| notices.update(|n| n.dismiss(id))
                            on:mouseenter=move |_| notices.update(|n| n.pause(id))
                            on:mouseleave=move |_| notices.update(|n| n.resume(id))
                            title="Dismiss"
                        >
                            <span class="notice__message">{notice.message}</span>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
