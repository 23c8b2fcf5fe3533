//! Task management page: the signed-in landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything goes through the record facades in `services`. There is no
//! client cache; every mutation is followed by a full reload of tasks and
//! categories, so the list always mirrors the store.

use chrono::Local;
use leptos::prelude::*;

use crate::components::task_card::TaskCard;
use crate::components::task_filters::TaskFilters;
use crate::components::task_form::TaskForm;
use crate::services::Services;
use crate::services::tasks::{NewTask, TaskPatch};
use crate::state::notices::{NoticeLevel, NoticeState, Notifier};
use crate::state::tasks::TasksState;

fn reload(services: Services, state: RwSignal<TasksState>) {
    state.update(|s| s.loading = true);
    leptos::task::spawn_local(async move {
        let tasks = services.tasks.list_tasks().await;
        let categories = services.categories.list_categories().await;
        log::debug!("loaded {} tasks, {} categories", tasks.len(), categories.len());
        state.update(|s| {
            s.tasks = tasks;
            s.categories = categories;
            s.loading = false;
        });
    });
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let state = RwSignal::new(TasksState::default());
    let busy = RwSignal::new(false);

    reload(services.clone(), state);

    let today = Local::now().date_naive();
    let stats = Signal::derive(move || state.with(|s| s.stats(today)));
    let categories = Signal::derive(move || state.with(|s| s.categories.clone()));

    let on_create = Callback::new({
        let services = services.clone();
        move |input: NewTask| {
            busy.set(true);
            let services = services.clone();
            leptos::task::spawn_local(async move {
                if services.tasks.create_task(&input).await.is_ok() {
                    notices.raise(NoticeLevel::Success, "Task created");
                }
                busy.set(false);
                reload(services, state);
            });
        }
    });

    let on_toggle = Callback::new({
        let services = services.clone();
        move |(id, completed): (i64, bool)| {
            let services = services.clone();
            leptos::task::spawn_local(async move {
                // Failures already raised a notice; the reload restores the row.
                let _ = services.tasks.update_task(id, &TaskPatch::completion(completed)).await;
                reload(services, state);
            });
        }
    });

    let on_delete = Callback::new({
        let services = services.clone();
        move |id: i64| {
            let services = services.clone();
            leptos::task::spawn_local(async move {
                if services.tasks.delete_task(id).await {
                    notices.raise(NoticeLevel::Info, "Task deleted");
                }
                reload(services, state);
            });
        }
    });

    let color_of = move |name: &str| {
        state.with_untracked(|s| s.categories.iter().find(|c| c.name == name).map(|c| c.color.clone()))
    };

    view! {
        <main class="tasks-page">
            <TaskForm categories=categories busy=busy on_submit=on_create/>
            <TaskFilters state=state stats=stats/>
            <Show
                when=move || !state.with(|s| s.loading && s.tasks.is_empty())
                fallback=|| view! { <p class="tasks-page__loading">"Loading tasks..."</p> }
            >
                <Show
                    when=move || state.with(|s| !s.visible().is_empty())
                    fallback=|| view! { <p class="tasks-page__empty">"No tasks here yet."</p> }
                >
                    <ul class="tasks-page__list">
                        <For
                            each=move || state.with(TasksState::visible)
                            key=|task| (task.id, task.completed, task.title.clone(), task.category.clone())
                            let:task
                        >
                            {
                                let color = color_of(&task.category);
                                view! {
                                    <TaskCard
                                        task=task
                                        today=today
                                        color=color
                                        on_toggle=on_toggle
                                        on_delete=on_delete
                                    />
                                }
                            }
                        </For>
                    </ul>
                </Show>
            </Show>
        </main>
    }
}
