//! One task row with completion toggle and delete.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::services::tasks::{Priority, Task};
use crate::state::tasks::is_overdue;

fn priority_modifier(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "task-card__priority--low",
        Priority::Medium => "task-card__priority--medium",
        Priority::High => "task-card__priority--high",
    }
}

#[component]
pub fn TaskCard(
    task: Task,
    today: NaiveDate,
    #[prop(into)] color: Option<String>,
    on_toggle: Callback<(i64, bool)>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    let id = task.id;
    let completed = task.completed;
    let overdue = is_overdue(&task, today);
    let priority = task.priority;
    let due = task.due_date.map(|d| d.format("%b %-d, %Y").to_string());
    let description = (!task.description.is_empty()).then_some(task.description);
    let category = (!task.category.is_empty()).then_some(task.category);
    let chip_style = color.map(|c| format!("background-color: {c}")).unwrap_or_default();

    view! {
        <li class="task-card" class:task-card--done=completed class:task-card--overdue=overdue>
            <input
                class="task-card__toggle"
                type="checkbox"
                prop:checked=completed
                on:change=move |_| on_toggle.run((id, !completed))
                aria-label="Toggle complete"
            />
            <div class="task-card__body">
                <span class="task-card__title">{task.title}</span>
                {description.map(|d| view! { <p class="task-card__description">{d}</p> })}
                <div class="task-card__meta">
                    <span class=format!("task-card__priority {}", priority_modifier(priority))>
                        {priority.as_str()}
                    </span>
                    {category.map(|c| view! { <span class="task-card__category" style=chip_style>{c}</span> })}
                    {due.map(|d| view! { <span class="task-card__due">"Due " {d}</span> })}
                </div>
            </div>
            <button
                class="task-card__delete"
                on:click=move |_| on_delete.run(id)
                title="Delete task"
                aria-label="Delete task"
            >
                "✕"
            </button>
        </li>
    }
}
