use anyhow::Result;
use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};
use tracing::{debug, warn};

use crate::models::EncodedBlob;

/// Qualities tried in order; the first one that fits the ceiling wins
pub const QUALITY_LADDER: [u8; 9] = [85, 80, 75, 70, 65, 60, 55, 50, 45];

/// Used when nothing on the ladder fits; the result may exceed the ceiling
pub const FALLBACK_QUALITY: u8 = 40;

/// A lossy codec with a 0-100 quality knob
pub trait LossyEncoder {
    fn encode_at(&self, image: &RgbImage, quality: u8) -> Result<Vec<u8>>;
}

/// JPEG encoder, with optimized Huffman tables unless built with [`JpegQualityEncoder::baseline`]
#[derive(Debug, Clone, Copy)]
pub struct JpegQualityEncoder {
    optimize: bool,
}

impl JpegQualityEncoder {
    pub fn optimized() -> Self {
        Self { optimize: true }
    }

    /// Standard Huffman tables; larger output, mostly useful for comparison
    pub fn baseline() -> Self {
        Self { optimize: false }
    }
}

impl Default for JpegQualityEncoder {
    fn default() -> Self {
        Self::optimized()
    }
}

impl LossyEncoder for JpegQualityEncoder {
    fn encode_at(&self, image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
        let (width, height) = image.dimensions();
        let width = u16::try_from(width)
            .map_err(|_| anyhow::anyhow!("Image width {} is too large for JPEG", width))?;
        let height = u16::try_from(height)
            .map_err(|_| anyhow::anyhow!("Image height {} is too large for JPEG", height))?;

        let mut bytes = Vec::new();
        let mut encoder = Encoder::new(&mut bytes, quality);
        encoder.set_optimized_huffman_tables(self.optimize);
        encoder
            .encode(image.as_raw(), width, height, ColorType::Rgb)
            .map_err(|e| anyhow::anyhow!("Failed to encode JPEG at quality {}: {}", quality, e))?;
        Ok(bytes)
    }
}

/// Finds the highest ladder quality whose output stays under a byte ceiling
#[derive(Debug, Clone, Default)]
pub struct SizeBoundedEncoder<E = JpegQualityEncoder> {
    encoder: E,
}

impl SizeBoundedEncoder<JpegQualityEncoder> {
    pub fn new() -> Self {
        Self::with_encoder(JpegQualityEncoder::optimized())
    }
}

impl<E: LossyEncoder> SizeBoundedEncoder<E> {
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encode(&self, image: &RgbImage, ceiling: usize) -> Result<EncodedBlob> {
        for quality in QUALITY_LADDER {
            let bytes = self.encoder.encode_at(image, quality)?;
            debug!("Quality {}: {} bytes (ceiling {})", quality, bytes.len(), ceiling);

            if bytes.len() <= ceiling {
                return Ok(EncodedBlob { bytes, quality });
            }
        }

        let bytes = self.encoder.encode_at(image, FALLBACK_QUALITY)?;
        if bytes.len() > ceiling {
            warn!(
                "Quality {} still produces {} bytes, over the {} byte ceiling",
                FALLBACK_QUALITY,
                bytes.len(),
                ceiling
            );
        }

        Ok(EncodedBlob {
            bytes,
            quality: FALLBACK_QUALITY,
        })
    }
}

/// JPEG-encode `image`, trading quality for size until it fits `ceiling`
pub fn encode(image: &RgbImage, ceiling: usize) -> Result<EncodedBlob> {
    SizeBoundedEncoder::new().encode(image, ceiling)
}
