//! Category records (`category_c`): the lookup tasks are filed under.

#[cfg(test)]
#[path = "categories_test.rs"]
mod categories_test;

use serde_json::{Map, Value};

use super::records::{ID_FIELD, RecordAccess, RecordKey, RecordKind, ServiceError, integer, text};
use crate::net::types::{FetchQuery, SortType};

pub const CATEGORY_KIND: &str = "category_c";
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";

const NAME_FIELD: &str = "Name";
const CATEGORY_FIELDS: &[&str] = &[ID_FIELD, NAME_FIELD, "name_c", "color_c", "task_count_c"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub task_count: u32,
}

impl RecordKind for Category {
    const KIND: &'static str = CATEGORY_KIND;
    const NOUN: &'static str = "category";
    const PLURAL: &'static str = "categories";

    fn fields() -> &'static [&'static str] {
        CATEGORY_FIELDS
    }

    fn list_query() -> FetchQuery {
        FetchQuery::select(CATEGORY_FIELDS).order_by(NAME_FIELD, SortType::Asc)
    }

    fn from_row(row: &Value) -> Option<Self> {
        Some(Self {
            id: integer(row, ID_FIELD)?,
            name: text(row, "name_c")
                .or_else(|| text(row, NAME_FIELD))
                .unwrap_or_default(),
            color: text(row, "color_c").unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_owned()),
            task_count: integer(row, "task_count_c")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub color: Option<String>,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Clone)]
pub struct CategoryService {
    records: RecordAccess,
}

impl CategoryService {
    #[must_use]
    pub fn new(records: RecordAccess) -> Self {
        Self { records }
    }

    /// All categories by name. Empty on any failure.
    pub async fn list_categories(&self) -> Vec<Category> {
        self.records.list().await
    }

    pub async fn get_category(&self, id: impl Into<RecordKey>) -> Option<Category> {
        self.records.get(&id.into()).await
    }

    /// Backing id of the first category called `name`.
    ///
    /// Names are not unique in the store; duplicates resolve to whichever
    /// comes first in name order.
    pub async fn find_id_by_name(&self, name: &str) -> Option<i64> {
        self.list_categories()
            .await
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] when the store rejects the record or the
    /// transport fails.
    pub async fn create_category(&self, input: &NewCategory) -> Result<Category, ServiceError> {
        let color = input.color.clone().unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_owned());
        let record = serde_json::json!({
            "Name": input.name,
            "name_c": input.name,
            "color_c": color,
            "task_count_c": 0,
        });
        let echoed = self.records.create::<Category>(record).await?;
        let mut category =
            Category::from_row(&echoed).ok_or(ServiceError::NoSuccess { action: "create", noun: "category" })?;
        if category.name.is_empty() {
            category.name.clone_from(&input.name);
        }
        Ok(category)
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] when the id is not numeric, the store rejects
    /// the record, or the transport fails.
    pub async fn update_category(
        &self,
        id: impl Into<RecordKey>,
        patch: &CategoryPatch,
    ) -> Result<Category, ServiceError> {
        let id = id.into().require().inspect_err(|e| log::error!("error updating category: {e}"))?;
        let mut record = Map::new();
        record.insert(ID_FIELD.to_owned(), Value::from(id));
        if let Some(name) = &patch.name {
            record.insert(NAME_FIELD.to_owned(), Value::from(name.as_str()));
            record.insert("name_c".to_owned(), Value::from(name.as_str()));
        }
        if let Some(color) = &patch.color {
            record.insert("color_c".to_owned(), Value::from(color.as_str()));
        }
        let echoed = self.records.update::<Category>(Value::Object(record)).await?;
        Category::from_row(&echoed).ok_or(ServiceError::NoSuccess { action: "update", noun: "category" })
    }

    pub async fn delete_category(&self, id: impl Into<RecordKey>) -> bool {
        self.records.delete::<Category>(&id.into()).await
    }
}
