use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Result;
use tracing::debug;

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Trait that all render steps must implement
pub trait RenderStep: Send + Sync {
    /// Transform the canvas and hand it to the next step
    fn process(&self, image: RgbaImage) -> Result<RgbaImage>;

    /// Human-readable name for this step (used in logs and debug file names)
    fn name(&self) -> &str;
}

/// Composable render pipeline; steps run in the order they were added
#[derive(Clone)]
pub struct RenderPipeline {
    steps: Vec<Arc<dyn RenderStep>>,
    debug: Option<DebugConfig>,
}

impl RenderPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            debug: None,
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn RenderStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step over `input`. `label` names the debug subdirectory.
    pub fn run(&self, input: RgbaImage, label: &str) -> Result<RgbaImage> {
        self.save_debug_output(&input, label, "00_input.png")?;

        let mut image = input;
        for (step_idx, step) in self.steps.iter().enumerate() {
            debug!("Running step: {} on {}", step.name(), label);
            image = step.process(image)?;

            let filename = format!(
                "{:02}_{}.png",
                step_idx + 1,
                step.name().to_lowercase().replace(' ', "_")
            );
            self.save_debug_output(&image, label, &filename)?;
        }

        Ok(image)
    }

    fn save_debug_output(&self, image: &RgbaImage, label: &str, filename: &str) -> Result<()> {
        if let Some(debug_config) = &self.debug {
            let run_dir = debug_config.output_dir.join(label);
            std::fs::create_dir_all(&run_dir)?;

            let output_path = run_dir.join(filename);
            image.save(&output_path)
                .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;

            debug!("Debug: saved {}/{}", label, filename);
        }

        Ok(())
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}
