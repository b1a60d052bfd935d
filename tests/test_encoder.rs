//! Integration tests for the size-bounded encoder.
//!
//! Tests cover:
//! - First quality on the ladder that fits wins
//! - Fallback to the minimum quality when nothing fits
//! - Real JPEG output for rendered images

mod common;

use featured_images::encode::{FALLBACK_QUALITY, QUALITY_LADDER};
use featured_images::render::fill_gradient;
use featured_images::{
    encode, render, GeneratorConfig, JpegQualityEncoder, LossyEncoder, SizeBoundedEncoder,
};
use image::RgbImage;

use common::*;

fn blank_image() -> RgbImage {
    RgbImage::new(4, 4)
}

#[test]
fn test_highest_fitting_quality_wins() -> anyhow::Result<()> {
    let fake = FakeEncoder::new(10);
    let encoder = SizeBoundedEncoder::with_encoder(&fake);

    // 70 * 10 = 700 bytes is the first size under the ceiling
    let blob = encoder.encode(&blank_image(), 705)?;
    assert_eq!(blob.quality, 70);
    assert_eq!(blob.len(), 700);
    assert_eq!(fake.calls(), vec![85, 80, 75, 70]);

    Ok(())
}

#[test]
fn test_ceiling_is_inclusive() -> anyhow::Result<()> {
    let fake = FakeEncoder::new(10);
    let blob = SizeBoundedEncoder::with_encoder(&fake).encode(&blank_image(), 850)?;
    assert_eq!(blob.quality, 85);
    assert_eq!(fake.calls(), vec![85]);

    Ok(())
}

#[test]
fn test_fallback_quality_when_nothing_fits() -> anyhow::Result<()> {
    let fake = FakeEncoder::new(10);
    let blob = SizeBoundedEncoder::with_encoder(&fake).encode(&blank_image(), 100)?;

    assert_eq!(blob.quality, FALLBACK_QUALITY);
    assert_eq!(blob.len(), 400);
    assert!(!blob.fits(100));

    let mut expected = QUALITY_LADDER.to_vec();
    expected.push(FALLBACK_QUALITY);
    assert_eq!(fake.calls(), expected);

    Ok(())
}

#[test]
fn test_fallback_is_returned_even_if_it_fits() -> anyhow::Result<()> {
    // 45 -> 450 bytes is over, 40 -> 400 bytes is under
    let fake = FakeEncoder::new(10);
    let blob = SizeBoundedEncoder::with_encoder(&fake).encode(&blank_image(), 420)?;
    assert_eq!(blob.quality, 40);
    assert!(blob.fits(420));

    Ok(())
}

#[test]
fn test_small_render_encodes_at_top_quality() -> anyhow::Result<()> {
    let pre_blur = fill_gradient(&black_white_black(), 4, 4)?;
    assert_eq!(pre_blur.get_pixel(0, 0)[0], 0);
    assert_eq!(pre_blur.get_pixel(0, 2)[0], 255);

    let image = render(&black_white_black(), 4, 4)?;
    let blob = encode(&image, 200 * 1024)?;

    assert_eq!(blob.quality, 85);
    assert!(blob.len() <= 204800);
    assert_eq!(&blob.bytes[..2], &[0xFF, 0xD8]);

    let decoded = image::load_from_memory(&blob.bytes)?;
    assert_eq!((decoded.width(), decoded.height()), (4, 4));

    Ok(())
}

#[test]
fn test_optimized_tables_are_not_larger_than_baseline() -> anyhow::Result<()> {
    let image = render(&mixed_gradient(), 320, 180)?;

    for quality in [85, 60, 40] {
        let optimized = JpegQualityEncoder::optimized().encode_at(&image, quality)?;
        let baseline = JpegQualityEncoder::baseline().encode_at(&image, quality)?;
        assert!(
            optimized.len() <= baseline.len(),
            "quality {}: optimized {} > baseline {}",
            quality,
            optimized.len(),
            baseline.len()
        );

        let decoded = image::load_from_memory(&optimized)?;
        assert_eq!((decoded.width(), decoded.height()), (320, 180));
    }

    Ok(())
}

#[test]
fn test_default_encoder_is_optimized() -> anyhow::Result<()> {
    let image = render(&mixed_gradient(), 64, 36)?;
    let blob = encode(&image, 200 * 1024)?;
    let optimized = JpegQualityEncoder::optimized().encode_at(&image, blob.quality)?;
    assert_eq!(blob.bytes, optimized);

    Ok(())
}

#[test]
fn test_unreachable_ceiling_returns_best_effort_jpeg() -> anyhow::Result<()> {
    let image = render(&mixed_gradient(), 64, 36)?;
    let blob = encode(&image, 1)?;

    assert_eq!(blob.quality, FALLBACK_QUALITY);
    assert!(blob.len() > 1);

    Ok(())
}

#[test]
fn test_reference_canvas_fits_default_ceiling() -> anyhow::Result<()> {
    let config = GeneratorConfig::default();
    let item = &config.items[0];

    let image = render(&item.gradient, config.width, config.height)?;
    let blob = encode(&image, config.max_file_size)?;

    assert!(blob.fits(config.max_file_size));
    assert!(QUALITY_LADDER.contains(&blob.quality));

    Ok(())
}
