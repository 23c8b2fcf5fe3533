//! Record-store capability: the remote CRUD surface of the data SDK.
//!
//! Services hold an `Arc<dyn RecordStore>` so tests can substitute a mock
//! without a live backend. Browser promises are not `Send`, so futures are
//! `?Send` even though the store object itself is shareable.

use serde_json::Value;

use super::types::{FetchQuery, StoreResponse};

/// Transport-level failure: the call never produced a response envelope.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The SDK is not loaded (or not available outside the browser).
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The SDK call threw or its promise rejected.
    #[error("record store request failed: {0}")]
    Request(String),

    /// The SDK answered with something that is not a response envelope.
    #[error("record store response malformed: {0}")]
    Malformed(String),
}

#[async_trait::async_trait(?Send)]
pub trait RecordStore: Send + Sync {
    /// `fetchRecords(kind, {fields, orderBy})`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the call does not produce a response.
    async fn fetch_records(&self, kind: &str, query: &FetchQuery) -> Result<StoreResponse, StoreError>;

    /// `getRecordById(kind, id, {fields})`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the call does not produce a response.
    async fn get_record_by_id(&self, kind: &str, id: i64, query: &FetchQuery) -> Result<StoreResponse, StoreError>;

    /// `createRecord(kind, {records})`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the call does not produce a response.
    async fn create_records(&self, kind: &str, records: Vec<Value>) -> Result<StoreResponse, StoreError>;

    /// `updateRecord(kind, {records})`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the call does not produce a response.
    async fn update_records(&self, kind: &str, records: Vec<Value>) -> Result<StoreResponse, StoreError>;

    /// `deleteRecord(kind, {RecordIds})`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the call does not produce a response.
    async fn delete_records(&self, kind: &str, ids: Vec<i64>) -> Result<StoreResponse, StoreError>;
}
