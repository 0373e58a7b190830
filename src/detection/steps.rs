use crate::config::ClassifierConfig;
use crate::detection::preprocessing;
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineStep};
use image::GrayImage;
use std::sync::Arc;

/// Apply Gaussian blur with a fixed kernel (sigma derived from its size)
pub struct BlurStep {
    pub kernel_size: u32,
}

impl PipelineStep for BlurStep {
    fn process(&self, image: GrayImage) -> Result<GrayImage> {
        Ok(preprocessing::apply_blur(&image, self.kernel_size))
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Inverted Gaussian adaptive threshold: dark-on-light becomes foreground
pub struct AdaptiveThresholdStep {
    pub block_size: u32,
    pub bias: i32,
}

impl PipelineStep for AdaptiveThresholdStep {
    fn process(&self, image: GrayImage) -> Result<GrayImage> {
        Ok(preprocessing::adaptive_threshold_inv(&image, self.block_size, self.bias))
    }

    fn name(&self) -> &str {
        "Adaptive Threshold"
    }
}

/// Morphological closing to merge small gaps between foreground pixels
pub struct ClosingStep {
    pub kernel_size: u32,
}

impl PipelineStep for ClosingStep {
    fn process(&self, image: GrayImage) -> Result<GrayImage> {
        Ok(preprocessing::close_mask(&image, self.kernel_size))
    }

    fn name(&self) -> &str {
        "Closing"
    }
}

/// Grayscale, blur, threshold: the silhouette mask for reference images
pub fn reference_mask_pipeline(config: &ClassifierConfig) -> Pipeline {
    Pipeline::new()
        .add_step(Arc::new(BlurStep {
            kernel_size: config.blur_kernel,
        }))
        .add_step(Arc::new(AdaptiveThresholdStep {
            block_size: config.threshold_block,
            bias: config.threshold_bias,
        }))
}

/// The reference mask followed by a closing pass, used on query images
pub fn query_mask_pipeline(config: &ClassifierConfig) -> Pipeline {
    reference_mask_pipeline(config).add_step(Arc::new(ClosingStep {
        kernel_size: config.closing_kernel,
    }))
}
