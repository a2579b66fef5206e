use crate::detection::{BoundingBox, DetectedRegion};

/// Decode a YOLOv8 head laid out as `[4 + classes][boxes]` (row-major).
///
/// Rows 0..4 hold `cx, cy, w, h` in model-input pixels; the rest are
/// per-class scores. Returns candidates above `conf_threshold`, still in
/// model-input coordinates.
pub fn decode_candidates(
    output: &[f32],
    attrs: usize,
    boxes: usize,
    conf_threshold: f32,
) -> Vec<DetectedRegion> {
    if attrs <= 4 || output.len() < attrs * boxes {
        return Vec::new();
    }
    let at = |row: usize, col: usize| output[row * boxes + col];

    (0..boxes)
        .filter_map(|b| {
            let (class_id, confidence) = (4..attrs)
                .map(|row| (row - 4, at(row, b)))
                .fold((0, f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });
            if confidence < conf_threshold {
                return None;
            }
            Some(DetectedRegion {
                class_id,
                confidence,
                bbox: BoundingBox::from_center(at(0, b), at(1, b), at(2, b), at(3, b)),
            })
        })
        .collect()
}

/// Per-class greedy non-maximum suppression. Output is sorted by descending
/// confidence and truncated to `max_detections`.
pub fn non_max_suppression(
    mut candidates: Vec<DetectedRegion>,
    iou_threshold: f32,
    max_detections: usize,
) -> Vec<DetectedRegion> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<DetectedRegion> = Vec::new();
    for candidate in candidates {
        if kept.len() >= max_detections {
            break;
        }
        let overlaps = kept.iter().any(|k| {
            k.class_id == candidate.class_id && k.bbox.iou(&candidate.bbox) > iou_threshold
        });
        if !overlaps {
            kept.push(candidate);
        }
    }
    kept
}
