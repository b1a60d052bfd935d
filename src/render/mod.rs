pub mod steps;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, ensure};
use image::{DynamicImage, Rgb, RgbImage};

use crate::models::{ColorStop, GradientSpec};
use crate::pipeline::RenderPipeline;
use steps::{BlurStep, CircleOverlayStep, FlattenStep};

/// Gaussian blur sigma used to soften the scanline bands
pub const BLUR_SIGMA: f32 = 2.0;

/// Number of translucent circles laid over every image
pub const CIRCLE_COUNT: u32 = 3;

/// Opacity of each overlay circle
pub const CIRCLE_ALPHA: u8 = 15;

/// A filled circle in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayCircle {
    pub center: (i32, i32),
    pub radius: i32,
}

/// Geometry of the decorative circles, in drawing order.
///
/// Circle `i` is centered at `(width * (0.2 + 0.3i), height * (0.3 + 0.2i))`
/// with a diameter of `200 + 100i` pixels.
pub fn overlay_circles(width: u32, height: u32) -> Vec<OverlayCircle> {
    (0..CIRCLE_COUNT)
        .map(|i| {
            let i = i as f64;
            let x = width as f64 * (0.2 + i * 0.3);
            let y = height as f64 * (0.3 + i * 0.2);
            let diameter = 200.0 + i * 100.0;
            OverlayCircle {
                center: (x.round() as i32, y.round() as i32),
                radius: (diameter / 2.0) as i32,
            }
        })
        .collect()
}

/// Color of scanline `y` before blur and overlays are applied.
///
/// The upper half blends the first stop into the middle one, the lower half the
/// middle stop into the last one. Channels are truncated, not rounded.
pub fn scanline_color(stops: &GradientSpec, y: u32, height: u32) -> ColorStop {
    let [first, middle, last] = stops.stops();
    let progress = y as f64 / height as f64;

    let (from, to, local) = if progress < 0.5 {
        (first, middle, progress * 2.0)
    } else {
        (middle, last, (progress - 0.5) * 2.0)
    };

    ColorStop::new(
        lerp_channel(from.r, to.r, local),
        lerp_channel(from.g, to.g, local),
        lerp_channel(from.b, to.b, local),
    )
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let from = from as f64;
    (from + (to as f64 - from) * t) as u8
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    ensure!(
        width > 0 && height > 0,
        "Canvas dimensions must be positive, got {}x{}",
        width,
        height
    );
    Ok(())
}

/// Fill a canvas with the raw vertical gradient, one color per scanline
pub fn fill_gradient(stops: &GradientSpec, width: u32, height: u32) -> Result<RgbImage> {
    check_dimensions(width, height)?;

    let rows: Vec<Rgb<u8>> = (0..height)
        .map(|y| scanline_color(stops, y, height).into())
        .collect();

    Ok(RgbImage::from_fn(width, height, |_, y| rows[y as usize]))
}

/// Renders gradient images: fill, then blur, circle overlays and flattening
pub struct GradientRenderer {
    pipeline: RenderPipeline,
}

impl GradientRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: standard_pipeline(),
        }
    }

    /// Save every intermediate canvas under `output_dir`
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        self.pipeline = self.pipeline.with_debug(output_dir)?;
        Ok(self)
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    pub fn render(&self, stops: &GradientSpec, width: u32, height: u32) -> Result<RgbImage> {
        self.render_labeled("render", stops, width, height)
    }

    /// Same as [`GradientRenderer::render`]; `label` names the debug output directory
    pub fn render_labeled(
        &self,
        label: &str,
        stops: &GradientSpec,
        width: u32,
        height: u32,
    ) -> Result<RgbImage> {
        let canvas = fill_gradient(stops, width, height)?;
        let canvas = DynamicImage::ImageRgb8(canvas).to_rgba8();
        let finished = self.pipeline.run(canvas, label)?;
        Ok(DynamicImage::ImageRgba8(finished).to_rgb8())
    }
}

impl Default for GradientRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Blur, then circles 0, 1, 2, then flatten. Order changes output pixels.
pub fn standard_pipeline() -> RenderPipeline {
    RenderPipeline::new()
        .add_step(Arc::new(BlurStep { sigma: BLUR_SIGMA }))
        .add_step(Arc::new(CircleOverlayStep {
            color: image::Rgba([255, 255, 255, CIRCLE_ALPHA]),
        }))
        .add_step(Arc::new(FlattenStep {
            background: Rgb([0, 0, 0]),
        }))
}

/// Render a finished, opaque gradient image
pub fn render(stops: &GradientSpec, width: u32, height: u32) -> Result<RgbImage> {
    GradientRenderer::new().render(stops, width, height)
}
