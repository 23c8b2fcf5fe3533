//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the shell chrome and the task list while reading/writing
//! shared state from Leptos context providers.

pub mod app_header;
pub mod loading;
pub mod notice_stack;
pub mod task_card;
pub mod task_filters;
pub mod task_form;
