use std::path::Path;

use anyhow::Context;
use image::DynamicImage;
use rten::Model;
use rten_tensor::NdTensor;
use rten_tensor::prelude::*;
use serde::Deserialize;
use tracing::debug;

use crate::detection::{
    DetectionResult, LabelTable, ObjectDetector, nms, preprocessing,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YoloParams {
    pub input_size: u32,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

impl Default for YoloParams {
    fn default() -> Self {
        Self {
            input_size: 640,
            confidence_threshold: 0.25,
            iou_threshold: 0.45,
            max_detections: 300,
        }
    }
}

/// YOLOv8 detector running a `.rten` checkpoint
pub struct YoloDetector {
    model: Model,
    labels: LabelTable,
    params: YoloParams,
}

impl YoloDetector {
    pub fn load<P: AsRef<Path>>(
        model_path: P,
        labels: LabelTable,
        params: YoloParams,
    ) -> anyhow::Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            anyhow::bail!(
                "Detection model not found at {}.\n\
                 Export a YOLOv8 checkpoint to ONNX and convert it with rten-convert.",
                model_path.display()
            );
        }
        let model = Model::load_file(model_path)
            .with_context(|| format!("Failed to load detection model {:?}", model_path))?;
        Ok(Self { model, labels, params })
    }

    pub fn params(&self) -> &YoloParams {
        &self.params
    }
}

impl ObjectDetector for YoloDetector {
    fn detect(&self, img: &DynamicImage) -> anyhow::Result<DetectionResult> {
        let size = self.params.input_size;
        let lb = preprocessing::letterbox(img, size);
        let input = NdTensor::from_data([1, 3, size as usize, size as usize], lb.data.clone());

        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|e| anyhow::anyhow!("Model inference failed: {:?}", e))?;
        let output: NdTensor<f32, 3> = output
            .try_into()
            .map_err(|e| anyhow::anyhow!("Unexpected model output: {:?}", e))?;

        // [batch, 4 + classes, boxes]
        let [_, attrs, boxes] = output.shape();
        let raw: Vec<f32> = output.iter().copied().collect();

        let candidates =
            nms::decode_candidates(&raw, attrs, boxes, self.params.confidence_threshold);
        let mut regions = nms::non_max_suppression(
            candidates,
            self.params.iou_threshold,
            self.params.max_detections,
        );

        for region in &mut regions {
            let (x1, y1) = lb.to_source(region.bbox.x1, region.bbox.y1);
            let (x2, y2) = lb.to_source(region.bbox.x2, region.bbox.y2);
            region.bbox.x1 = x1;
            region.bbox.y1 = y1;
            region.bbox.x2 = x2;
            region.bbox.y2 = y2;
            region.bbox = region.bbox.clamp_to(img.width(), img.height());
        }

        debug!(boxes, kept = regions.len(), "yolo inference finished");
        Ok(DetectionResult::new(regions, self.labels.clone()))
    }

    fn label_table(&self) -> &LabelTable {
        &self.labels
    }
}
