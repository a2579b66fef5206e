use image::{DynamicImage, Rgb, RgbImage, imageops::FilterType};

/// Gray used by ultralytics to pad letterboxed inputs.
const PAD_VALUE: u8 = 114;

/// An image scaled into a square model input, plus what is needed to map
/// model coordinates back onto the source image.
#[derive(Debug, Clone)]
pub struct Letterbox {
    /// CHW planar RGB, values in [0, 1]
    pub data: Vec<f32>,
    pub size: u32,
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl Letterbox {
    /// Map a point in model-input space back to source-image space
    pub fn to_source(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Resize keeping aspect ratio, center on a `size`x`size` gray canvas, and
/// convert to normalized CHW floats.
pub fn letterbox(img: &DynamicImage, size: u32) -> Letterbox {
    let (w, h) = (img.width().max(1), img.height().max(1));
    let scale = (size as f32 / w as f32).min(size as f32 / h as f32);
    let new_w = ((w as f32 * scale).round() as u32).clamp(1, size);
    let new_h = ((h as f32 * scale).round() as u32).clamp(1, size);

    let resized = image::imageops::resize(&img.to_rgb8(), new_w, new_h, FilterType::Triangle);
    let mut canvas = RgbImage::from_pixel(size, size, Rgb([PAD_VALUE; 3]));
    let pad_x = (size - new_w) / 2;
    let pad_y = (size - new_h) / 2;
    image::imageops::overlay(&mut canvas, &resized, pad_x.into(), pad_y.into());

    let plane = (size * size) as usize;
    let mut data = vec![0.0f32; 3 * plane];
    for (x, y, pixel) in canvas.enumerate_pixels() {
        let idx = (y * size + x) as usize;
        for c in 0..3 {
            data[c * plane + idx] = pixel[c] as f32 / 255.0;
        }
    }

    Letterbox {
        data,
        size,
        scale,
        pad_x: pad_x as f32,
        pad_y: pad_y as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_is_padded_vertically() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 100, Rgb([255, 0, 0])));
        let lb = letterbox(&img, 64);
        assert_eq!(lb.data.len(), 3 * 64 * 64);
        assert!((lb.scale - 0.32).abs() < 1e-6);
        assert_eq!(lb.pad_x, 0.0);
        assert_eq!(lb.pad_y, 16.0);

        // top-left is padding, center is the red image
        let plane = 64 * 64;
        assert!((lb.data[0] - 114.0 / 255.0).abs() < 1e-6);
        let center = 32 * 64 + 32;
        assert!((lb.data[center] - 1.0).abs() < 0.01);
        assert!(lb.data[plane + center].abs() < 0.01);
    }

    #[test]
    fn maps_points_back_to_source() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(200, 100));
        let lb = letterbox(&img, 64);
        let (x, y) = lb.to_source(32.0, 32.0);
        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
    }
}
