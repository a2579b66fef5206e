use std::future::Future;

use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Handle returned by `add`: the key the store assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub collection: String,
    pub id: String,
}

/// A stored document as read back. The body is schemaless JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
    pub create_time: OffsetDateTime,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>, create_time: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            data,
            create_time,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

pub trait DocumentStore {
    /// Append a record to `collection` under a fresh key.
    fn add<T: Serialize + Sync>(
        &self,
        collection: &str,
        record: &T,
    ) -> impl Future<Output = anyhow::Result<DocumentRef>>;

    /// Every document in `collection`, in insertion order.
    fn stream(&self, collection: &str) -> impl Future<Output = anyhow::Result<Vec<Document>>>;
}
