use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::detection::DetectionResult;

const PALETTE: [[u8; 3]; 8] = [
    [255, 56, 56],
    [255, 157, 151],
    [255, 112, 31],
    [255, 178, 29],
    [207, 210, 49],
    [72, 249, 10],
    [26, 147, 52],
    [0, 212, 187],
];

const THICKNESS: i32 = 3;

/// Draw one outlined box per detected region, colored by class.
pub fn draw_detections(img: &DynamicImage, result: &DetectionResult) -> RgbImage {
    let mut canvas = img.to_rgb8();
    for region in &result.regions {
        let bbox = region.bbox.clamp_to(canvas.width(), canvas.height());
        let color = Rgb(PALETTE[region.class_id % PALETTE.len()]);
        for inset in 0..THICKNESS {
            let w = bbox.width() as i32 - 2 * inset;
            let h = bbox.height() as i32 - 2 * inset;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = Rect::at(bbox.x1 as i32 + inset, bbox.y1 as i32 + inset)
                .of_size(w as u32, h as u32);
            draw_hollow_rect_mut(&mut canvas, rect, color);
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{BoundingBox, DetectedRegion, LabelTable};

    #[test]
    fn outlines_region_and_leaves_interior() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(50, 50));
        let result = DetectionResult::new(
            vec![DetectedRegion {
                class_id: 0,
                confidence: 0.9,
                bbox: BoundingBox { x1: 10.0, y1: 10.0, x2: 40.0, y2: 40.0 },
            }],
            LabelTable::coco(),
        );
        let out = draw_detections(&img, &result);
        assert_eq!(out.get_pixel(10, 20), &Rgb(PALETTE[0]));
        assert_eq!(out.get_pixel(25, 25), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(2, 2), &Rgb([0, 0, 0]));
    }

    #[test]
    fn empty_result_returns_copy() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([9, 9, 9])));
        let out = draw_detections(&img, &DetectionResult::new(vec![], LabelTable::coco()));
        assert_eq!(out, img.to_rgb8());
    }
}
