use image::{DynamicImage, RgbImage};
use tracing::{debug, info, warn};

use crate::{
    core::db::{DetectionRepository, DocumentRef},
    detection::{DetectionResult, ObjectDetector, annotate},
    location,
    models::DetectionRecord,
};

pub const MISSING_LOCATION_WARNING: &str = "Please enter a location before saving.";
pub const SAVED_MESSAGE: &str = "Detection and location saved for mapping!";

/// What the detector made of one uploaded image
#[derive(Debug, Clone)]
pub struct Analysis {
    pub filename: String,
    pub result: DetectionResult,
    /// One label per detected region, model order
    pub labels: Vec<String>,
}

impl Analysis {
    pub fn annotated(&self, img: &DynamicImage) -> RgbImage {
        annotate::draw_detections(img, &self.result)
    }

    pub fn into_record(self, location: impl Into<String>) -> DetectionRecord {
        DetectionRecord::new(self.filename, location, self.labels)
    }
}

/// Run the detector over an uploaded image and extract its labels.
pub fn analyze<D: ObjectDetector + ?Sized>(
    detector: &D,
    filename: impl Into<String>,
    img: &DynamicImage,
) -> anyhow::Result<Analysis> {
    let filename = filename.into();
    let result = detector.detect(img)?;
    let labels = result.labels()?;
    debug!(file = %filename, count = labels.len(), "detected obstacles");
    Ok(Analysis {
        filename,
        result,
        labels,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(DocumentRef),
    /// Nothing was written; the message is meant for the user.
    Rejected(&'static str),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }

    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Saved(_) => SAVED_MESSAGE,
            SaveOutcome::Rejected(msg) => *msg,
        }
    }
}

/// Persist a detection unless the location is blank.
///
/// Only blankness is checked here; a malformed location such as `"abc"` is
/// stored verbatim and later dropped from the map when it fails to parse.
pub async fn save_detection<R: DetectionRepository>(
    repo: &R,
    record: &DetectionRecord,
) -> anyhow::Result<SaveOutcome> {
    if location::is_blank(&record.location) {
        warn!(file = %record.filename, "save rejected: blank location");
        return Ok(SaveOutcome::Rejected(MISSING_LOCATION_WARNING));
    }
    let doc = repo.add_detection(record).await?;
    info!(file = %record.filename, id = %doc.id, "detection saved");
    Ok(SaveOutcome::Saved(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{BoundingBox, DetectedRegion, LabelTable};

    struct FixedDetector(Vec<usize>, LabelTable);

    impl ObjectDetector for FixedDetector {
        fn detect(&self, _img: &DynamicImage) -> anyhow::Result<DetectionResult> {
            let regions = self
                .0
                .iter()
                .map(|&class_id| DetectedRegion {
                    class_id,
                    confidence: 0.5,
                    bbox: BoundingBox { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 },
                })
                .collect();
            Ok(DetectionResult::new(regions, self.1.clone()))
        }

        fn label_table(&self) -> &LabelTable {
            &self.1
        }
    }

    #[test]
    fn analyze_extracts_labels_in_model_order() -> anyhow::Result<()> {
        let img = DynamicImage::new_rgb8(4, 4);
        let analysis = analyze(&FixedDetector(vec![2, 0, 13, 2], LabelTable::coco()), "road.jpg", &img)?;
        assert_eq!(analysis.labels, vec!["car", "person", "bench", "car"]);

        let record = analysis.into_record("1,2");
        assert_eq!(record.filename, "road.jpg");
        assert_eq!(record.detected_obstacles.len(), 4);
        Ok(())
    }

    #[test]
    fn analyze_surfaces_unknown_classes() {
        let img = DynamicImage::new_rgb8(4, 4);
        assert!(analyze(&FixedDetector(vec![500], LabelTable::coco()), "x.png", &img).is_err());
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(SaveOutcome::Rejected(MISSING_LOCATION_WARNING).message(), MISSING_LOCATION_WARNING);
        assert!(!SaveOutcome::Rejected(MISSING_LOCATION_WARNING).is_saved());
    }
}
