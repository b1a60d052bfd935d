use crate::pipeline::RenderStep;
use crate::render::overlay_circles;
use anyhow::{Result, ensure};
use image::{Pixel, Rgb, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use imageproc::filter::gaussian_blur_f32;

/// Apply Gaussian blur to the whole canvas
pub struct BlurStep {
    pub sigma: f32,
}

impl RenderStep for BlurStep {
    fn process(&self, image: RgbaImage) -> Result<RgbaImage> {
        ensure!(self.sigma > 0.0, "Blur sigma must be positive, got {}", self.sigma);
        Ok(gaussian_blur_f32(&image, self.sigma))
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Composite translucent circles over the canvas, one layer per circle
pub struct CircleOverlayStep {
    pub color: Rgba<u8>,
}

impl RenderStep for CircleOverlayStep {
    fn process(&self, mut image: RgbaImage) -> Result<RgbaImage> {
        let (width, height) = image.dimensions();

        for circle in overlay_circles(width, height) {
            // The circle rasterizer revisits rows; blend each layer only once.
            let mut layer = RgbaImage::new(width, height);
            draw_filled_circle_mut(&mut layer, circle.center, circle.radius, self.color);
            for (dst, src) in image.pixels_mut().zip(layer.pixels()) {
                blend_over(dst, src);
            }
        }

        Ok(image)
    }

    fn name(&self) -> &str {
        "Circle Overlay"
    }
}

/// "Over" compositing of `src` onto `dst` in 8-bit fixed point, rounding to nearest.
///
/// For an opaque `dst` each channel becomes `round((src * a + dst * (255 - a)) / 255)`.
pub fn blend_over(dst: &mut Rgba<u8>, src: &Rgba<u8>) {
    let src_a = src[3] as u32;
    if src_a == 0 {
        return;
    }

    // Both weights are scaled by 255
    let dst_weight = dst[3] as u32 * (255 - src_a);
    let src_weight = src_a * 255;
    let out_a = src_weight + dst_weight;

    for c in 0..3 {
        let sum = src[c] as u32 * src_weight + dst[c] as u32 * dst_weight;
        dst[c] = ((sum + out_a / 2) / out_a) as u8;
    }
    dst[3] = ((out_a + 127) / 255) as u8;
}

/// Drop transparency by compositing onto an opaque background
pub struct FlattenStep {
    pub background: Rgb<u8>,
}

impl RenderStep for FlattenStep {
    fn process(&self, mut image: RgbaImage) -> Result<RgbaImage> {
        let background = self.background.to_rgba();
        for pixel in image.pixels_mut() {
            let mut flat = background;
            blend_over(&mut flat, pixel);
            *pixel = flat;
        }
        Ok(image)
    }

    fn name(&self) -> &str {
        "Flatten"
    }
}
