pub mod preprocessing;
pub mod contours;
pub mod matcher;
pub mod references;
pub mod steps;

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::models::{Classification, DetectedObject, Outline, ReferenceSet};
use crate::pipeline::Pipeline;
use crate::render;

pub use contours::ContourExtractor;
pub use matcher::{AreaMatch, AreaMatcher};
pub use references::{ReferenceLoader, open_image};

/// Classifies the silhouettes of a query image against a reference set
pub struct ClassificationPipeline {
    config: ClassifierConfig,
    mask_pipeline: Pipeline,
    extractor: ContourExtractor,
    matcher: AreaMatcher,
}

impl ClassificationPipeline {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let mask_pipeline = steps::query_mask_pipeline(&config);
        Ok(Self {
            config,
            mask_pipeline,
            extractor: ContourExtractor,
            matcher: AreaMatcher,
        })
    }

    /// Write every intermediate mask below `output_dir`
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        self.mask_pipeline = self.mask_pipeline.with_debug(output_dir)?;
        Ok(self)
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one image file. An empty path yields `Ok(None)`.
    ///
    /// A decode failure only fails this call; `references` is never touched.
    pub fn classify(
        &self,
        image_path: &Path,
        references: &ReferenceSet,
    ) -> Result<Option<Classification>> {
        if image_path.as_os_str().is_empty() {
            return Ok(None);
        }

        let img = open_image(image_path)?;
        let tag = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "query".to_string());

        let mask = self.mask_pipeline.run(&img, &tag)?;
        let outlines = self.extractor.extract(&mask);
        let total = outlines.len();
        let candidates = self.filter_outlines(outlines);
        debug!(total, kept = candidates.len(), "filtered outlines by area");

        let mut rendering = img.to_rgb8();
        let mut objects = Vec::with_capacity(candidates.len());
        let mut report = String::new();

        for (i, outline) in candidates.into_iter().enumerate() {
            let number = i + 1;
            let area = outline.area();
            let centroid = outline.centroid();
            let found = self.matcher.best_match(&outline, references);
            let label = found.map(|m| m.label);
            let category = label
                .and_then(|l| self.config.categories.name(l))
                .map(str::to_string);

            debug!(
                number,
                area,
                points = outline.len(),
                label = ?label,
                difference = found.map(|m| m.difference),
                "classified object"
            );

            render::draw_outline(&mut rendering, &outline, render::OUTLINE_COLOR);
            if let Some(marker) = label.and_then(|l| self.config.categories.marker(l)) {
                render::draw_marker(&mut rendering, marker, centroid, render::MARKER_COLOR);
            }

            report.push_str(&report_line(number, &outline, category.as_deref()));

            objects.push(DetectedObject {
                number,
                outline,
                area,
                centroid,
                label,
                category,
            });
        }

        Ok(Some(Classification {
            objects,
            report,
            rendering,
        }))
    }

    /// Keep outlines whose area lies strictly inside the configured band,
    /// preserving extraction order
    pub fn filter_outlines(&self, outlines: Vec<Outline>) -> Vec<Outline> {
        outlines
            .into_iter()
            .filter(|o| self.config.area_in_band(o.area()))
            .collect()
    }
}

/// One report line. The count is the number of polygon vertices, not the
/// pixel area; consumers parse it as is.
pub fn report_line(number: usize, outline: &Outline, category: Option<&str>) -> String {
    format!(
        "Object #{}: {} pixels - Category: {}\n",
        number,
        outline.len(),
        category.unwrap_or("")
    )
}
