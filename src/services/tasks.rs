//! Task records (`task_c`) and the task CRUD facade used by the pages.
//!
//! Tasks reference their category by lookup id in the store, but the UI
//! works in category names. Writes resolve the name with a category list
//! lookup first; reads take the name from the lookup's `Name`.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::categories::CategoryService;
use super::records::{
    ID_FIELD, RecordAccess, RecordKey, RecordKind, ServiceError, date, flag, integer, lookup_name, text, timestamp,
    wire_date, wire_timestamp,
};
use crate::net::types::{FetchQuery, SortType};

pub const TASK_KIND: &str = "task_c";

const TITLE: &str = "title_c";
const DESCRIPTION: &str = "description_c";
const COMPLETED: &str = "completed_c";
const PRIORITY: &str = "priority_c";
const CATEGORY: &str = "category_c";
const DUE_DATE: &str = "due_date_c";
const CREATED_AT: &str = "created_at_c";
const COMPLETED_AT: &str = "completed_at_c";

const TASK_FIELDS: &[&str] = &[
    ID_FIELD,
    TITLE,
    DESCRIPTION,
    COMPLETED,
    PRIORITY,
    CATEGORY,
    DUE_DATE,
    CREATED_AT,
    COMPLETED_AT,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Case-insensitive parse of a stored priority.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    /// Category name; empty when unfiled.
    pub category: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// `Some` exactly when `completed`.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Re-establish the completion invariant after a write.
    fn settle_completion(&mut self, stamped: Option<DateTime<Utc>>) {
        if self.completed {
            if self.completed_at.is_none() {
                self.completed_at = Some(stamped.unwrap_or_else(Utc::now));
            }
        } else {
            self.completed_at = None;
        }
    }
}

impl RecordKind for Task {
    const KIND: &'static str = TASK_KIND;
    const NOUN: &'static str = "task";
    const PLURAL: &'static str = "tasks";

    fn fields() -> &'static [&'static str] {
        TASK_FIELDS
    }

    fn list_query() -> FetchQuery {
        FetchQuery::select(TASK_FIELDS).order_by(CREATED_AT, SortType::Desc)
    }

    fn from_row(row: &Value) -> Option<Self> {
        Some(Self {
            id: integer(row, ID_FIELD)?,
            title: text(row, TITLE).unwrap_or_default(),
            description: text(row, DESCRIPTION).unwrap_or_default(),
            completed: flag(row, COMPLETED).unwrap_or(false),
            priority: text(row, PRIORITY)
                .and_then(|p| Priority::parse(&p))
                .unwrap_or_default(),
            category: lookup_name(row, CATEGORY).unwrap_or_default(),
            due_date: date(row, DUE_DATE),
            created_at: timestamp(row, CREATED_AT).unwrap_or_else(Utc::now),
            completed_at: timestamp(row, COMPLETED_AT),
        })
    }
}

/// Input for [`TaskService::create_task`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    /// Category name; resolved to its id before submitting.
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Partial update for [`TaskService::update_task`]. `None` leaves a field
/// unchanged; `due_date: Some(None)` clears the due date.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    /// `Some("")` or an unknown name clears the category.
    pub category: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    #[must_use]
    pub fn completion(completed: bool) -> Self {
        Self { completed: Some(completed), ..Self::default() }
    }
}

#[derive(Clone)]
pub struct TaskService {
    records: RecordAccess,
    categories: CategoryService,
}

impl TaskService {
    #[must_use]
    pub fn new(records: RecordAccess) -> Self {
        let categories = CategoryService::new(records.clone());
        Self { records, categories }
    }

    /// All tasks, newest first. Empty on any failure.
    pub async fn list_tasks(&self) -> Vec<Task> {
        self.records.list().await
    }

    pub async fn get_task(&self, id: impl Into<RecordKey>) -> Option<Task> {
        self.records.get(&id.into()).await
    }

    /// Create a task. New tasks always start incomplete.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the store rejects the record, no record
    /// is created, or the transport fails.
    pub async fn create_task(&self, input: &NewTask) -> Result<Task, ServiceError> {
        let category_id = self.resolve_category(input.category.as_deref()).await;
        let record = serde_json::json!({
            TITLE: input.title,
            DESCRIPTION: input.description,
            COMPLETED: false,
            PRIORITY: input.priority.unwrap_or_default().as_str(),
            CATEGORY: category_id,
            DUE_DATE: input.due_date.map(wire_date),
            CREATED_AT: wire_timestamp(Utc::now()),
            COMPLETED_AT: Value::Null,
        });
        let echoed = self.records.create::<Task>(record).await?;
        let mut task =
            Task::from_row(&echoed).ok_or(ServiceError::NoSuccess { action: "create", noun: "task" })?;
        if task.category.is_empty() {
            task.category = input.category.clone().unwrap_or_default();
        }
        Ok(task)
    }

    /// Apply a partial update. Completing a task stamps `completed_at` with
    /// the current time; reopening clears it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the id is not numeric, the store rejects
    /// the record, no record is updated, or the transport fails.
    pub async fn update_task(&self, id: impl Into<RecordKey>, patch: &TaskPatch) -> Result<Task, ServiceError> {
        let id = id.into().require().inspect_err(|e| log::error!("error updating task: {e}"))?;
        let category_id = self.resolve_category(patch.category.as_deref()).await;
        let completed_at = patch.completed.map(|done| done.then(Utc::now));

        let mut record = Map::new();
        record.insert(ID_FIELD.to_owned(), Value::from(id));
        if let Some(title) = &patch.title {
            record.insert(TITLE.to_owned(), Value::from(title.as_str()));
        }
        if let Some(description) = &patch.description {
            record.insert(DESCRIPTION.to_owned(), Value::from(description.as_str()));
        }
        if let (Some(completed), Some(at)) = (patch.completed, completed_at) {
            record.insert(COMPLETED.to_owned(), Value::from(completed));
            record.insert(COMPLETED_AT.to_owned(), at.map_or(Value::Null, |at| Value::from(wire_timestamp(at))));
        }
        if let Some(priority) = patch.priority {
            record.insert(PRIORITY.to_owned(), Value::from(priority.as_str()));
        }
        if patch.category.is_some() {
            record.insert(CATEGORY.to_owned(), category_id.map_or(Value::Null, Value::from));
        }
        if let Some(due_date) = patch.due_date {
            record.insert(DUE_DATE.to_owned(), due_date.map_or(Value::Null, |d| Value::from(wire_date(d))));
        }

        let echoed = self.records.update::<Task>(Value::Object(record)).await?;
        let mut task =
            Task::from_row(&echoed).ok_or(ServiceError::NoSuccess { action: "update", noun: "task" })?;
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.settle_completion(completed_at.flatten());
        if task.category.is_empty() && category_id.is_some() {
            if let Some(name) = &patch.category {
                task.category.clone_from(name);
            }
        }
        Ok(task)
    }

    pub async fn delete_task(&self, id: impl Into<RecordKey>) -> bool {
        self.records.delete::<Task>(&id.into()).await
    }

    /// Lookup ids are resolved per write; an unknown or empty name is `None`.
    async fn resolve_category(&self, name: Option<&str>) -> Option<i64> {
        match name {
            Some(name) if !name.is_empty() => self.categories.find_id_by_name(name).await,
            _ => None,
        }
    }
}
