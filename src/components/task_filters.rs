//! Status tabs, category chips and summary counts above the task list.

use leptos::prelude::*;

use crate::state::tasks::{StatusFilter, TaskStats, TasksState};

#[component]
pub fn TaskFilters(state: RwSignal<TasksState>, #[prop(into)] stats: Signal<TaskStats>) -> impl IntoView {
    view! {
        <section class="task-filters">
            <div class="task-filters__stats">
                <span class="task-filters__stat">"Total " {move || stats.get().total}</span>
                <span class="task-filters__stat">"Active " {move || stats.get().active}</span>
                <span class="task-filters__stat">"Done " {move || stats.get().completed}</span>
                <span class="task-filters__stat task-filters__stat--overdue">
                    "Overdue " {move || stats.get().overdue}
                </span>
            </div>
            <div class="task-filters__status" role="tablist">
                {StatusFilter::ALL
                    .into_iter()
                    .map(|filter| {
                        view! {
                            <button
                                class="task-filters__tab"
                                class:task-filters__tab--active=move || state.with(|s| s.status == filter)
                                on:click=move |_| state.update(|s| s.status = filter)
                            >
                                {filter.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="task-filters__categories">
                <button
                    class="task-filters__chip"
                    class:task-filters__chip--active=move || state.with(|s| s.category.is_none())
                    on:click=move |_| state.update(|s| s.category = None)
                >
                    "All categories"
                </button>
                {move || {
                    state
                        .with(|s| s.categories.clone())
                        .into_iter()
                        .map(|category| {
                            let name = category.name.clone();
                            let selected = name.clone();
                            let chosen = name.clone();
                            view! {
                                <button
                                    class="task-filters__chip"
                                    class:task-filters__chip--active=move || {
                                        state.with(|s| s.category.as_deref() == Some(selected.as_str()))
                                    }
                                    style=format!("border-color: {}", category.color)
                                    on:click=move |_| state.update(|s| s.category = Some(chosen.clone()))
                                >
                                    {name}
                                    <span class="task-filters__count">{category.task_count}</span>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
