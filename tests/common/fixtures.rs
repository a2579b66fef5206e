use image::DynamicImage;
use obstaclemap::core::db::StoreClient;
use obstaclemap::detection::{
    BoundingBox, DetectedRegion, DetectionResult, LabelTable, ObjectDetector,
};
use obstaclemap::models::DetectionRecord;

/// Creates a StoreClient backed by a database file in a temporary directory.
/// Returns both the client and the temp directory (which must be kept alive).
pub async fn create_test_store() -> (StoreClient, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("test.db");
    let store = StoreClient::connect(&path)
        .await
        .expect("Failed to create test store");
    (store, dir)
}

/// Creates a DetectionRecord with test data
pub fn make_test_record(filename: &str, location: &str, obstacles: &[&str]) -> DetectionRecord {
    DetectionRecord::new(
        filename,
        location,
        obstacles.iter().map(|s| s.to_string()).collect(),
    )
}

/// Detector that reports a fixed list of COCO class indices for any image.
pub struct StubDetector {
    pub classes: Vec<usize>,
    pub labels: LabelTable,
}

impl StubDetector {
    pub fn new(classes: Vec<usize>) -> Self {
        Self {
            classes,
            labels: LabelTable::coco(),
        }
    }
}

impl ObjectDetector for StubDetector {
    fn detect(&self, img: &DynamicImage) -> anyhow::Result<DetectionResult> {
        let (w, h) = (img.width() as f32, img.height() as f32);
        let regions = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, &class_id)| DetectedRegion {
                class_id,
                confidence: 0.9 - i as f32 * 0.1,
                bbox: BoundingBox { x1: 0.0, y1: 0.0, x2: w / 2.0, y2: h / 2.0 },
            })
            .collect();
        Ok(DetectionResult::new(regions, self.labels.clone()))
    }

    fn label_table(&self) -> &LabelTable {
        &self.labels
    }
}

/// A blank 64x48 test image
pub fn test_image() -> DynamicImage {
    DynamicImage::new_rgb8(64, 48)
}
