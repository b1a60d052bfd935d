use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::encode::SizeBoundedEncoder;
use crate::models::ItemSpec;
use crate::render::GradientRenderer;

/// Outcome of generating one featured image
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub slug: String,
    pub path: PathBuf,
    pub size: usize,
    pub quality: u8,
    pub within_ceiling: bool,
}

/// Render, compress and write one item into `config.output_dir`
pub fn generate_item(
    config: &GeneratorConfig,
    renderer: &GradientRenderer,
    encoder: &SizeBoundedEncoder,
    item: &ItemSpec,
) -> Result<GeneratedImage> {
    info!("Generating: {}", item.slug);

    let image = renderer.render_labeled(&item.slug, &item.gradient, config.width, config.height)?;
    let blob = encoder.encode(&image, config.max_file_size)?;

    let path = config.output_dir.join(item.output_file_name());
    let size = blob.len();
    let quality = blob.quality;
    let within_ceiling = blob.fits(config.max_file_size);
    std::fs::write(&path, blob.into_bytes())?;

    info!(
        "Saved: {} ({:.1}KB, quality {})",
        path.display(),
        size as f64 / 1024.0,
        quality
    );

    Ok(GeneratedImage {
        slug: item.slug.clone(),
        path,
        size,
        quality,
        within_ceiling,
    })
}

/// Generate every configured item, in order, stopping at the first error
pub fn generate_images(
    config: &GeneratorConfig,
    renderer: &GradientRenderer,
) -> Result<Vec<GeneratedImage>> {
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let encoder = SizeBoundedEncoder::new();
    config
        .items
        .iter()
        .map(|item| generate_item(config, renderer, &encoder, item))
        .collect()
}
