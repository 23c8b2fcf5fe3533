//! Client-side reactive state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each state struct is plain data held in an `RwSignal` provided through
//! Leptos context; services and pages mutate it with `update`.

pub mod notices;
pub mod session;
pub mod tasks;
