pub mod config;
pub mod core;
pub mod detection;
pub mod geolocation;
pub mod location;
pub mod map;
pub mod models;
pub mod pipeline;
pub mod table;

pub use models::{Coordinates, DetectionRecord, Marker};
pub use detection::{DetectionResult, ObjectDetector};
pub use location::{LocationError, parse_location};
pub use map::{MapProjection, MapView, RecordProjection, SkipReason};
pub use pipeline::{Analysis, SaveOutcome, analyze, save_detection};
pub use table::RecordTable;

#[cfg(feature = "gui")]
pub mod gui;
