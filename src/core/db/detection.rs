use std::future::Future;

use crate::{
    core::db::{Document, DocumentRef},
    models::DetectionRecord,
};

/// Typed access to the detections collection.
pub trait DetectionRepository {
    fn add_detection(&self, record: &DetectionRecord) -> impl Future<Output = anyhow::Result<DocumentRef>>;
    fn stream_detections(&self) -> impl Future<Output = anyhow::Result<Vec<Document>>>;
}
