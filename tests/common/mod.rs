#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from obstaclemap for tests
pub use obstaclemap::core::db::{
    DetectionRepository, Document, DocumentRef, DocumentStore, StoreClient,
};
pub use obstaclemap::map::{MapProjection, MapView, SkipReason};
pub use obstaclemap::models::{Coordinates, DetectionRecord};
pub use obstaclemap::pipeline::{SaveOutcome, analyze, save_detection};
