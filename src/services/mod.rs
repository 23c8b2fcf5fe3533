//! Application services over the injected remote capabilities.
//!
//! ARCHITECTURE
//! ============
//! - `records`: response handling shared by every record kind.
//! - `tasks`, `categories`: typed facades the pages call.
//! - `session`: identity registration and logout.
//!
//! Services hold `Arc<dyn ...>` capabilities so tests swap in mocks; the app
//! shell builds one [`Services`] bundle and provides it through context.

pub mod categories;
pub mod records;
pub mod session;
pub mod tasks;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;

use crate::net::store::RecordStore;
use crate::state::notices::Notifier;

use self::categories::CategoryService;
use self::records::RecordAccess;
use self::tasks::TaskService;

/// Record facades sharing one store and one notice sink.
#[derive(Clone)]
pub struct Services {
    pub tasks: TaskService,
    pub categories: CategoryService,
}

impl Services {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        let records = RecordAccess::new(store, notifier);
        Self { tasks: TaskService::new(records.clone()), categories: CategoryService::new(records) }
    }
}
