pub mod annotate;
pub mod labels;
pub mod nms;
pub mod preprocessing;
pub mod yolo;

use image::DynamicImage;
use thiserror::Error;

pub use labels::LabelTable;
pub use yolo::{YoloDetector, YoloParams};

/// Bounding box in source-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x1: cx - w / 2.0,
            y1: cy - h / 2.0,
            x2: cx + w / 2.0,
            y2: cy + h / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);
        let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        let union = self.area() + other.area() - inter;
        if union <= 0.0 { 0.0 } else { inter / union }
    }

    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            x1: self.x1.clamp(0.0, w),
            y1: self.y1.clamp(0.0, h),
            x2: self.x2.clamp(0.0, w),
            y2: self.y2.clamp(0.0, h),
        }
    }
}

/// One region the model found
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedRegion {
    pub class_id: usize,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectionError {
    #[error("class index {0} has no entry in the label table")]
    UnknownClass(usize),
}

/// Model output for a single image, together with the label table the
/// class indices resolve against.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub regions: Vec<DetectedRegion>,
    pub names: LabelTable,
}

impl DetectionResult {
    pub fn new(regions: Vec<DetectedRegion>, names: LabelTable) -> Self {
        Self { regions, names }
    }

    /// One label per region, in the order the model emitted them.
    pub fn labels(&self) -> Result<Vec<String>, DetectionError> {
        self.regions
            .iter()
            .map(|region| {
                self.names
                    .get(region.class_id)
                    .map(str::to_string)
                    .ok_or(DetectionError::UnknownClass(region.class_id))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Anything that turns an image into labeled regions.
pub trait ObjectDetector: Send + Sync {
    fn detect(&self, img: &DynamicImage) -> anyhow::Result<DetectionResult>;

    fn label_table(&self) -> &LabelTable;
}
