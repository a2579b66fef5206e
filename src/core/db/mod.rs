mod detection;
mod document;
mod state;

use std::{path::Path, sync::Arc};

use anyhow::Context;
use serde::Serialize;
use serde_json::{Map, Value};
use state::StoreState;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, info};
use uuid::Uuid;

pub use detection::DetectionRepository;
pub use document::{Document, DocumentRef, DocumentStore};

use crate::models::DetectionRecord;

pub const DEFAULT_COLLECTION: &str = "detections";

/// Client for the document store. Constructed explicitly with [`StoreClient::connect`]
/// and passed to whatever needs it; cloning shares the same connection pool.
#[derive(Debug, Clone)]
pub struct StoreClient {
    state: Arc<StoreState>,
    collection: String,
}

impl StoreClient {
    pub async fn connect<P: AsRef<Path>>(db_file: P) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(StoreState::open(db_file).await?),
            collection: DEFAULT_COLLECTION.to_string(),
        })
    }

    /// Use a different collection for detection records.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Release the store. Clones of this client stop working too.
    pub async fn close(self) -> anyhow::Result<()> {
        self.state.close().await
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}

impl DocumentStore for StoreClient {
    async fn add<T: Serialize + Sync>(&self, collection: &str, record: &T) -> anyhow::Result<DocumentRef> {
        let body = serde_json::to_string(record).context("Failed to serialize document")?;
        let id = Uuid::new_v4().to_string();
        let create_time = OffsetDateTime::now_utc().format(&Rfc3339)?;

        let mut conn = self.state.conn().await?;
        sqlx::query("INSERT INTO document (id, collection, body, create_time) VALUES ($1, $2, $3, $4)")
            .bind(&id)
            .bind(collection)
            .bind(&body)
            .bind(&create_time)
            .execute(&mut *conn)
            .await?;

        info!(collection, id = %id, "document added");
        Ok(DocumentRef {
            collection: collection.to_string(),
            id,
        })
    }

    async fn stream(&self, collection: &str) -> anyhow::Result<Vec<Document>> {
        let mut conn = self.state.conn().await?;
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT id, body, create_time FROM document WHERE collection = $1 ORDER BY seq ASC",
        )
        .bind(collection)
        .fetch_all(&mut *conn)
        .await?;

        debug!(collection, count = rows.len(), "documents streamed");
        rows.into_iter()
            .map(|(id, body, create_time)| {
                let data: Map<String, Value> = serde_json::from_str(&body)
                    .with_context(|| format!("Document {} is not a JSON object", id))?;
                let create_time = OffsetDateTime::parse(&create_time, &Rfc3339)?;
                Ok(Document::new(id, data, create_time))
            })
            .collect()
    }
}

impl DetectionRepository for StoreClient {
    async fn add_detection(&self, record: &DetectionRecord) -> anyhow::Result<DocumentRef> {
        self.add(&self.collection, record).await
    }

    async fn stream_detections(&self) -> anyhow::Result<Vec<Document>> {
        self.stream(&self.collection).await
    }
}
