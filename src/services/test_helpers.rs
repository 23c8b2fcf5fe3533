//! Mock capabilities shared by service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::net::store::{RecordStore, StoreError};
use crate::net::types::{FetchQuery, RecordResult, StoreResponse};
use crate::state::notices::{NoticeLevel, Notifier};

// =========================================================================
// MockStore
// =========================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Fetch { kind: String, query: Value },
    Get { kind: String, id: i64 },
    Create { kind: String, records: Vec<Value> },
    Update { kind: String, records: Vec<Value> },
    Delete { kind: String, ids: Vec<i64> },
}

type Reply = Result<StoreResponse, StoreError>;

/// Record store answering from canned replies keyed by `(method, kind)`.
/// Unconfigured calls answer `success: true` with no data.
#[derive(Default)]
pub struct MockStore {
    replies: Mutex<HashMap<(&'static str, String), Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: &'static str, kind: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, kind.to_owned()), reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn reply(&self, method: &'static str, kind: &str, call: Call) -> Reply {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .get(&(method, kind.to_owned()))
            .cloned()
            .unwrap_or_else(|| Ok(StoreResponse { success: true, ..StoreResponse::default() }))
    }
}

#[async_trait::async_trait(?Send)]
impl RecordStore for MockStore {
    async fn fetch_records(&self, kind: &str, query: &FetchQuery) -> Result<StoreResponse, StoreError> {
        let query = serde_json::to_value(query).unwrap();
        self.reply("fetch", kind, Call::Fetch { kind: kind.to_owned(), query })
    }

    async fn get_record_by_id(&self, kind: &str, id: i64, _query: &FetchQuery) -> Result<StoreResponse, StoreError> {
        self.reply("get", kind, Call::Get { kind: kind.to_owned(), id })
    }

    async fn create_records(&self, kind: &str, records: Vec<Value>) -> Result<StoreResponse, StoreError> {
        self.reply("create", kind, Call::Create { kind: kind.to_owned(), records })
    }

    async fn update_records(&self, kind: &str, records: Vec<Value>) -> Result<StoreResponse, StoreError> {
        self.reply("update", kind, Call::Update { kind: kind.to_owned(), records })
    }

    async fn delete_records(&self, kind: &str, ids: Vec<i64>) -> Result<StoreResponse, StoreError> {
        self.reply("delete", kind, Call::Delete { kind: kind.to_owned(), ids })
    }
}

// =========================================================================
// Reply builders
// =========================================================================

pub fn rows(data: Value) -> Reply {
    Ok(StoreResponse { success: true, data: Some(data), ..StoreResponse::default() })
}

pub fn rejected(message: &str) -> Reply {
    Ok(StoreResponse { success: false, message: Some(message.to_owned()), ..StoreResponse::default() })
}

pub fn results(results: Vec<RecordResult>) -> Reply {
    Ok(StoreResponse { success: true, results: Some(results), ..StoreResponse::default() })
}

pub fn ok_item(data: Value) -> RecordResult {
    RecordResult { success: true, data: Some(data), ..RecordResult::default() }
}

pub fn failed_item(message: Option<&str>, field_errors: &[(&str, &str)]) -> RecordResult {
    let errors = field_errors
        .iter()
        .map(|(label, msg)| crate::net::types::FieldError {
            field_label: (*label).to_owned(),
            message: (*msg).to_owned(),
        })
        .collect::<Vec<_>>();
    RecordResult {
        success: false,
        data: None,
        errors: (!errors.is_empty()).then_some(errors),
        message: message.map(str::to_owned),
    }
}

pub fn transport_error() -> Reply {
    Err(StoreError::Request("network down".to_owned()))
}

// =========================================================================
// RecordingNotifier
// =========================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn raise(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_owned()));
    }
}

/// Store + notifier pair with the concrete handles kept for assertions.
pub fn harness(store: MockStore) -> (Arc<MockStore>, Arc<RecordingNotifier>) {
    (Arc::new(store), Arc::new(RecordingNotifier::default()))
}
