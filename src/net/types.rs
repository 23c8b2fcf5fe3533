//! Shared wire DTOs for the identity and record-store SDK boundary.
//!
//! DESIGN
//! ======
//! These types mirror the SDK's JSON payloads so serde round-trips stay
//! lossless. Record bodies stay as `serde_json::Value` here; the per-kind
//! field mapping lives in `services`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A signed-in user as reported by the identity SDK.
///
/// Only the fields the UI reads are typed; everything else is kept in
/// `extra` so the record can be handed back to the SDK unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Name shown in the header: first name, falling back to email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.email_address.as_deref())
            .unwrap_or_default()
    }
}

/// One field to select, serialized as `{"field": {"Name": "..."}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub field: FieldName,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: &'static str,
}

impl FieldSpec {
    #[must_use]
    pub fn named(name: &'static str) -> Self {
        Self { field: FieldName { name } }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SortType {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: &'static str,
    #[serde(rename = "sorttype")]
    pub sort_type: SortType,
}

/// Query parameters for `fetchRecords` / `getRecordById`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FetchQuery {
    pub fields: Vec<FieldSpec>,
    #[serde(rename = "orderBy", skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
}

impl FetchQuery {
    #[must_use]
    pub fn select(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.iter().copied().map(FieldSpec::named).collect(),
            order_by: Vec::new(),
        }
    }

    #[must_use]
    pub fn order_by(mut self, field_name: &'static str, sort_type: SortType) -> Self {
        self.order_by.push(OrderBy { field_name, sort_type });
        self
    }
}

/// Field-level validation error attached to a failed record result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "fieldLabel", default)]
    pub field_label: String,
    #[serde(default)]
    pub message: String,
}

/// Per-record outcome inside a create/update/delete response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope returned by every record-store call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecordResult>>,
}

impl StoreResponse {
    /// Message to surface for an explicit `success: false` response.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Request failed".to_owned())
    }

    /// Rows of a list response. A missing or non-array `data` is empty.
    #[must_use]
    pub fn rows(&self) -> &[serde_json::Value] {
        match &self.data {
            Some(serde_json::Value::Array(rows)) => rows,
            _ => &[],
        }
    }
}
