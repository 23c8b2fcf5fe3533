//! Create-task form.

#[cfg(test)]
#[path = "task_form_test.rs"]
mod task_form_test;

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::services::categories::Category;
use crate::services::records::DATE_FORMAT;
use crate::services::tasks::{NewTask, Priority};

/// Raw form input as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub due_date: String,
}

impl TaskDraft {
    /// Validate and convert. Blank optional inputs become `None`.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when the title is blank or the due date
    /// is not `YYYY-MM-DD`.
    pub fn to_new_task(&self) -> Result<NewTask, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required");
        }
        let due_date = match self.due_date.trim() {
            "" => None,
            raw => Some(NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| "Due date is invalid")?),
        };
        let category = self.category.trim();
        Ok(NewTask {
            title: title.to_owned(),
            description: self.description.trim().to_owned(),
            priority: Priority::parse(&self.priority),
            category: (!category.is_empty()).then(|| category.to_owned()),
            due_date,
        })
    }
}

#[component]
pub fn TaskForm(
    #[prop(into)] categories: Signal<Vec<Category>>,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<NewTask>,
) -> impl IntoView {
    let draft = RwSignal::new(TaskDraft { priority: Priority::default().as_str().to_owned(), ..TaskDraft::default() });
    let problem = RwSignal::new(None::<&'static str>);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        match draft.with_untracked(TaskDraft::to_new_task) {
            Ok(task) => {
                problem.set(None);
                on_submit.run(task);
                draft.update(|d| {
                    d.title.clear();
                    d.description.clear();
                    d.due_date.clear();
                });
            }
            Err(message) => problem.set(Some(message)),
        }
    };

    view! {
        <form class="task-form" on:submit=submit>
            <input
                class="task-form__title"
                type="text"
                placeholder="What needs doing?"
                prop:value=move || draft.with(|d| d.title.clone())
                on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
            />
            <textarea
                class="task-form__description"
                placeholder="Details (optional)"
                prop:value=move || draft.with(|d| d.description.clone())
                on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
            ></textarea>
            <div class="task-form__row">
                <select
                    class="task-form__priority"
                    prop:value=move || draft.with(|d| d.priority.clone())
                    on:change=move |ev| draft.update(|d| d.priority = event_target_value(&ev))
                >
                    {Priority::ALL
                        .into_iter()
                        .map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> })
                        .collect_view()}
                </select>
                <select
                    class="task-form__category"
                    prop:value=move || draft.with(|d| d.category.clone())
                    on:change=move |ev| draft.update(|d| d.category = event_target_value(&ev))
                >
                    <option value="">"No category"</option>
                    {move || {
                        categories
                            .get()
                            .into_iter()
                            .map(|c| {
                                let label = c.name.clone();
                                view! { <option value=c.name>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
                <input
                    class="task-form__due"
                    type="date"
                    prop:value=move || draft.with(|d| d.due_date.clone())
                    on:input=move |ev| draft.update(|d| d.due_date = event_target_value(&ev))
                />
                <button class="btn task-form__submit" type="submit" disabled=move || busy.get()>
                    "Add Task"
                </button>
            </div>
            {move || problem.get().map(|m| view! { <p class="task-form__problem">{m}</p> })}
        </form>
    }
}
