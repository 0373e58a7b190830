use image::{DynamicImage, GrayImage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::detection::preprocessing;
use crate::error::{ClassifyError, Result};

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Trait that all mask steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform a single-channel image into the next stage's input
    fn process(&self, image: GrayImage) -> Result<GrayImage>;

    /// Human-readable name for this step (used in logs and debug output)
    fn name(&self) -> &str;
}

/// Composable mask pipeline: grayscale conversion followed by the added steps
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    debug: Option<DebugConfig>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(ClassifyError::invalid(
                    "debug_out",
                    format!("directory is not empty: {}", output_dir.display()),
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step in order; `tag` names the debug sub-directory
    pub fn run(&self, input: &DynamicImage, tag: &str) -> Result<GrayImage> {
        let mut image = preprocessing::to_grayscale(input);
        self.save_debug(tag, 0, "grayscale", &image)?;

        for (step_idx, step) in self.steps.iter().enumerate() {
            debug!(step = step.name(), width = image.width(), height = image.height(), "running step");
            image = step.process(image)?;
            self.save_debug(tag, step_idx + 1, step.name(), &image)?;
        }

        Ok(image)
    }

    fn save_debug(&self, tag: &str, index: usize, name: &str, image: &GrayImage) -> Result<()> {
        let Some(debug_config) = &self.debug else {
            return Ok(());
        };

        let dir = debug_config.output_dir.join(tag);
        std::fs::create_dir_all(&dir)?;
        let filename = format!("{:02}_{}.png", index, name.to_lowercase().replace(' ', "_"));
        let output_path = dir.join(&filename);
        image.save(&output_path).map_err(ClassifyError::ImageSave)?;

        debug!(path = %output_path.display(), "saved debug mask");
        Ok(())
    }
}
