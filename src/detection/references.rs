use image::GrayImage;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ClassifierConfig;
use crate::detection::contours::ContourExtractor;
use crate::detection::steps::reference_mask_pipeline;
use crate::error::{ClassifyError, Result};
use crate::models::{ReferenceLabel, ReferenceSet};
use crate::pipeline::Pipeline;

/// Decode an image, mapping every failure (missing file included) to
/// `ImageDecode`
pub fn open_image(path: &Path) -> Result<image::DynamicImage> {
    image::open(path).map_err(|e| ClassifyError::decode(path, e))
}

/// Turns reference image files into silhouette masks
pub struct ReferenceLoader {
    pipeline: Pipeline,
}

impl ReferenceLoader {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            pipeline: reference_mask_pipeline(config),
        }
    }

    /// One mask per path, in the same order
    pub fn load<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<GrayImage>> {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                let img = open_image(path)?;
                debug!(path = %path.display(), width = img.width(), height = img.height(), "loaded reference");
                let tag = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "reference".to_string());
                self.pipeline.run(&img, &tag)
            })
            .collect()
    }
}

impl ReferenceSet {
    /// Load, threshold and trace every configured reference image.
    ///
    /// Any unreadable reference is an error. An empty result is not: it is
    /// logged and every later match simply yields no label.
    pub fn build(config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let loader = ReferenceLoader::new(config);
        let masks = loader.load(&config.references)?;
        let extractor = ContourExtractor;

        let labels: Vec<ReferenceLabel> = config
            .references
            .iter()
            .zip(masks.iter())
            .enumerate()
            .map(|(label, (path, mask))| {
                let outlines = extractor.extract(mask);
                info!(
                    label,
                    category = config.categories.name(label).unwrap_or(""),
                    outlines = outlines.len(),
                    "reference loaded"
                );
                ReferenceLabel {
                    source: Some(path.clone()),
                    outlines,
                }
            })
            .collect();

        let set = ReferenceSet::new(labels);
        if set.is_empty() {
            warn!("reference set is empty; objects will be reported without a category");
        }
        Ok(set)
    }
}
