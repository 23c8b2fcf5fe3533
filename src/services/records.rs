//! Generic record access over the remote record store.
//!
//! DESIGN
//! ======
//! Every record kind goes through the same five calls. A [`RecordKind`]
//! supplies the store name, the fields to select, and the row mapping;
//! [`RecordAccess`] owns the response handling shared by all kinds.
//!
//! ERROR HANDLING
//! ==============
//! - `success: false`: the store's message becomes a user-visible notice and
//!   the call returns its safe default (empty list, `None`, `false`) or
//!   `ServiceError::Rejected` for writes.
//! - Mixed `results`: one notice per failed item; the first success still
//!   returns.
//! - Transport errors: logged only. Reads and deletes swallow them, create
//!   and update return them.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;

use crate::net::store::{RecordStore, StoreError};
use crate::net::types::{FetchQuery, RecordResult, StoreResponse};
use crate::state::notices::Notifier;

pub const ID_FIELD: &str = "Id";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The store answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The store answered but no record in the batch succeeded.
    #[error("Failed to {action} {noun}")]
    NoSuccess { action: &'static str, noun: &'static str },

    #[error("invalid record id: {0:?}")]
    InvalidId(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A record kind stored remotely under a field-tagged schema.
pub trait RecordKind: Sized {
    /// Store collection name, e.g. `task_c`.
    const KIND: &'static str;
    /// Singular noun used in messages.
    const NOUN: &'static str;
    /// Plural noun used in messages.
    const PLURAL: &'static str;

    /// Fields selected on list and get.
    fn fields() -> &'static [&'static str];

    /// Query used by list, including its ordering.
    fn list_query() -> FetchQuery;

    /// Map one store row; `None` if it has no usable `Id`.
    fn from_row(row: &Value) -> Option<Self>;
}

/// Record id as supplied by a caller: already numeric, or raw route text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKey {
    Id(i64),
    Raw(String),
}

impl From<i64> for RecordKey {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RecordKey {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_owned())
    }
}

impl From<String> for RecordKey {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl RecordKey {
    /// Integer id: leading whitespace skipped, optional sign, then the
    /// leading run of digits (`"12abc"` is 12, `"abc"` is not an id).
    #[must_use]
    pub fn coerce(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Raw(raw) => {
                let trimmed = raw.trim_start();
                let (sign, rest) = match trimmed.as_bytes().first() {
                    Some(b'-') => (-1, &trimmed[1..]),
                    Some(b'+') => (1, &trimmed[1..]),
                    _ => (1, trimmed),
                };
                let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
                rest[..digits_len].parse::<i64>().ok().map(|n| sign * n)
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }

    pub(crate) fn require(&self) -> Result<i64, ServiceError> {
        self.coerce().ok_or_else(|| ServiceError::InvalidId(self.describe()))
    }
}

/// Which write produced a batch of results; picks notice and error wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

impl WriteOp {
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    #[must_use]
    pub fn progressive(self) -> &'static str {
        match self {
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
        }
    }
}

/// Shared response handling for all record kinds.
#[derive(Clone)]
pub struct RecordAccess {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl RecordAccess {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// All records of `K`, mapped. Never fails.
    pub async fn list<K: RecordKind>(&self) -> Vec<K> {
        match self.store.fetch_records(K::KIND, &K::list_query()).await {
            Ok(resp) if !resp.success => {
                self.reject(&resp);
                Vec::new()
            }
            Ok(resp) => resp.rows().iter().filter_map(K::from_row).collect(),
            Err(e) => {
                log::error!("error fetching {}: {e}", K::PLURAL);
                Vec::new()
            }
        }
    }

    /// One record of `K` by id. `None` when absent, unparseable, or failed.
    pub async fn get<K: RecordKind>(&self, key: &RecordKey) -> Option<K> {
        let Some(id) = key.coerce() else {
            log::warn!("ignoring {} lookup with invalid id {:?}", K::NOUN, key.describe());
            return None;
        };
        match self
            .store
            .get_record_by_id(K::KIND, id, &FetchQuery::select(K::fields()))
            .await
        {
            Ok(resp) => resp.data.as_ref().filter(|d| !d.is_null()).and_then(K::from_row),
            Err(e) => {
                log::error!("error fetching {} {id}: {e}", K::NOUN);
                None
            }
        }
    }

    /// Create one record and return the first successful row as echoed by
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the store rejects the call, no item in
    /// the batch succeeds, or the transport fails.
    pub async fn create<K: RecordKind>(&self, record: Value) -> Result<Value, ServiceError> {
        let resp = self.store.create_records(K::KIND, vec![record]).await;
        self.settle_write::<K>(WriteOp::Create, resp)
    }

    /// Update one record (the payload carries its `Id`) and return the first
    /// successful row as echoed by the store.
    ///
    /// # Errors
    ///
    /// Same as [`RecordAccess::create`].
    pub async fn update<K: RecordKind>(&self, record: Value) -> Result<Value, ServiceError> {
        let resp = self.store.update_records(K::KIND, vec![record]).await;
        self.settle_write::<K>(WriteOp::Update, resp)
    }

    fn settle_write<K: RecordKind>(
        &self,
        op: WriteOp,
        resp: Result<StoreResponse, StoreError>,
    ) -> Result<Value, ServiceError> {
        let result = self.settle_write_inner::<K>(op, resp);
        if let Err(e) = &result {
            log::error!("error {} {}: {e}", op.progressive(), K::NOUN);
        }
        result
    }

    fn settle_write_inner<K: RecordKind>(
        &self,
        op: WriteOp,
        resp: Result<StoreResponse, StoreError>,
    ) -> Result<Value, ServiceError> {
        let resp = resp?;
        if !resp.success {
            return Err(ServiceError::Rejected(self.reject(&resp)));
        }
        let no_success = ServiceError::NoSuccess { action: op.verb(), noun: K::NOUN };
        let Some(results) = resp.results else {
            return Err(no_success);
        };
        let (successful, failed) = partition(results);
        self.report_failures::<K>(op, &failed);
        successful
            .into_iter()
            .next()
            .and_then(|r| r.data)
            .filter(|d| !d.is_null())
            .ok_or(no_success)
    }

    /// Delete one record. `true` iff at least one result succeeded.
    pub async fn delete<K: RecordKind>(&self, key: &RecordKey) -> bool {
        let Some(id) = key.coerce() else {
            log::error!("error deleting {}: invalid id {:?}", K::NOUN, key.describe());
            return false;
        };
        match self.store.delete_records(K::KIND, vec![id]).await {
            Ok(resp) if !resp.success => {
                self.reject(&resp);
                false
            }
            Ok(resp) => {
                let Some(results) = resp.results else {
                    return false;
                };
                let (successful, failed) = partition(results);
                self.report_failures::<K>(WriteOp::Delete, &failed);
                !successful.is_empty()
            }
            Err(e) => {
                log::error!("error deleting {} {id}: {e}", K::NOUN);
                false
            }
        }
    }

    /// Surface an explicit `success: false` and return its message.
    fn reject(&self, resp: &StoreResponse) -> String {
        let message = resp.failure_message();
        log::error!("{message}");
        self.notifier.error(&message);
        message
    }

    fn report_failures<K: RecordKind>(&self, op: WriteOp, failed: &[RecordResult]) {
        if failed.is_empty() {
            return;
        }
        log::error!("failed to {} {} {}: {failed:?}", op.verb(), failed.len(), K::PLURAL);
        for record in failed {
            if op != WriteOp::Delete {
                for error in record.errors.iter().flatten() {
                    self.notifier.error(&format!("{}: {}", error.field_label, error.message));
                }
            }
            if let Some(message) = record.message.as_deref().filter(|m| !m.is_empty()) {
                self.notifier.error(message);
            }
        }
    }
}

fn partition(results: Vec<RecordResult>) -> (Vec<RecordResult>, Vec<RecordResult>) {
    results.into_iter().partition(|r| r.success)
}

// =============================================================================
// FIELD READERS
// =============================================================================

/// Non-empty string field.
#[must_use]
pub fn text(row: &Value, field: &str) -> Option<String> {
    row.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[must_use]
pub fn flag(row: &Value, field: &str) -> Option<bool> {
    row.get(field).and_then(Value::as_bool)
}

/// Integer field, accepting numeric strings.
#[must_use]
pub fn integer(row: &Value, field: &str) -> Option<i64> {
    match row.get(field)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Display name of a lookup field: `{"Id": .., "Name": ..}` or a bare string.
#[must_use]
pub fn lookup_name(row: &Value, field: &str) -> Option<String> {
    match row.get(field)? {
        Value::Object(_) => text(&row[field], "Name"),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[must_use]
pub fn timestamp(row: &Value, field: &str) -> Option<DateTime<Utc>> {
    let raw = text(row, field)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Calendar date from `YYYY-MM-DD` or a full timestamp.
#[must_use]
pub fn date(row: &Value, field: &str) -> Option<NaiveDate> {
    let raw = text(row, field)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(&raw).ok().map(|dt| dt.date_naive()))
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp in the store's wire format (`2024-05-01T09:30:00.000Z`).
#[must_use]
pub fn wire_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[must_use]
pub fn wire_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
