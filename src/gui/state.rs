use std::sync::Arc;

use crate::{config::Settings, core::db::StoreClient, detection::ObjectDetector};

/// Everything screens share: configuration, the store client and the detector.
pub struct AppState {
    pub settings: Settings,
    pub store: Option<StoreClient>,
    pub detector: Result<Arc<dyn ObjectDetector>, String>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("detector_loaded", &self.detector.is_ok())
            .finish()
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let detector = settings
            .detector
            .build()
            .map(|d| Arc::new(d) as Arc<dyn ObjectDetector>)
            .map_err(|e| format!("{:#}", e));
        if let Err(err) = &detector {
            tracing::warn!(%err, "detector unavailable");
        }
        Self {
            settings,
            store: None,
            detector,
        }
    }
}
