use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail, ensure};
use serde::Deserialize;

use crate::models::{ColorStop, GradientSpec, ItemSpec};

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 675;
pub const DEFAULT_MAX_FILE_SIZE: usize = 200 * 1024;
pub const DEFAULT_OUTPUT_DIR: &str = "public/blog-images";

/// Immutable configuration for one generation run.
///
/// `Default` yields the built-in post list; a JSON file may override any field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: u32,
    pub height: u32,

    /// Byte ceiling each encoded image should stay under
    pub max_file_size: usize,

    pub output_dir: PathBuf,
    pub items: Vec<ItemSpec>,
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Reject configurations that could only produce malformed output
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "Canvas dimensions must be positive, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.max_file_size > 0, "max_file_size must be positive");

        let mut seen = HashSet::new();
        for item in &self.items {
            ensure!(!item.slug.trim().is_empty(), "Item slug must not be empty");
            if !seen.insert(item.slug.as_str()) {
                bail!("Duplicate item slug: {}", item.slug);
            }
        }

        Ok(())
    }

    /// Restrict the run to the named items, keeping configuration order
    pub fn select(&self, slugs: &[String]) -> Result<Self> {
        if let Some(unknown) = slugs
            .iter()
            .find(|slug| !self.items.iter().any(|item| &item.slug == *slug))
        {
            bail!("Unknown item slug: {}", unknown);
        }

        Ok(Self {
            items: self
                .items
                .iter()
                .filter(|item| slugs.contains(&item.slug))
                .cloned()
                .collect(),
            ..self.clone()
        })
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            items: default_items(),
        }
    }
}

const fn gradient(first: (u8, u8, u8), middle: (u8, u8, u8), last: (u8, u8, u8)) -> GradientSpec {
    GradientSpec::new(
        ColorStop::new(first.0, first.1, first.2),
        ColorStop::new(middle.0, middle.1, middle.2),
        ColorStop::new(last.0, last.1, last.2),
    )
}

/// Built-in blog posts and their color themes
pub fn default_items() -> Vec<ItemSpec> {
    vec![
        // Dark blue/gray
        ItemSpec::new(
            "why-you-should-not-buy-a-house",
            "House keys on a wooden table representing real estate decisions",
            gradient((44, 62, 80), (52, 73, 94), (127, 140, 141)),
        ),
        // Green for growth
        ItemSpec::new(
            "how-to-build-wealth",
            "Upward trending financial growth chart symbolizing wealth building",
            gradient((39, 174, 96), (46, 204, 113), (22, 160, 133)),
        ),
        ItemSpec::new(
            "just-right-engineering",
            "Clean code on a computer screen representing balanced software engineering",
            gradient((52, 73, 94), (44, 62, 80), (127, 140, 141)),
        ),
        // Purple for leadership
        ItemSpec::new(
            "post-modern-management",
            "Team collaboration workspace showing modern management practices",
            gradient((155, 89, 182), (142, 68, 173), (155, 89, 182)),
        ),
        ItemSpec::new(
            "enabling-multi-omic-data-management",
            "DNA helix and molecular structures representing multi-omic data",
            gradient((41, 128, 185), (52, 152, 219), (26, 188, 156)),
        ),
        ItemSpec::new(
            "the-philosophy-of-data-science",
            "Data visualization and analytics dashboard illustrating data science concepts",
            gradient((230, 126, 34), (231, 76, 60), (192, 57, 43)),
        ),
        ItemSpec::new(
            "quasi-experiments",
            "Laboratory equipment and experiments representing statistical experimentation",
            gradient((149, 165, 166), (127, 140, 141), (189, 195, 199)),
        ),
        // Gold/orange for career
        ItemSpec::new(
            "navigating-titles-in-the-ml-market",
            "Career pathway intersection representing ML career navigation",
            gradient((241, 196, 15), (243, 156, 18), (211, 84, 0)),
        ),
        ItemSpec::new(
            "effective-ethical-data-science-study-design",
            "Balanced scales representing ethical considerations in data science",
            gradient((52, 152, 219), (41, 128, 185), (142, 68, 173)),
        ),
        // Teal for data flow
        ItemSpec::new(
            "uniting-machine-learning-data-streaming-1",
            "Abstract data streams and network connections representing ML data streaming",
            gradient((26, 188, 156), (22, 160, 133), (52, 73, 94)),
        ),
        ItemSpec::new(
            "uniting-machine-learning-data-streaming-2",
            "Real-time data processing visualization showing streaming architecture",
            gradient((22, 160, 133), (26, 188, 156), (46, 204, 113)),
        ),
        // Red/dark for security
        ItemSpec::new(
            "automatically-detect-pii-real-time-cyber-defense",
            "Digital security shield and lock representing cybersecurity and data protection",
            gradient((231, 76, 60), (192, 57, 43), (44, 62, 80)),
        ),
    ]
}
