use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ClassifyError, Result};

/// Display names indexed by reference label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable(Vec<String>);

impl CategoryTable {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Name for a label index, `None` when the index is out of range
    pub fn name(&self, label: usize) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    /// 1-based marker drawn on the rendering for a label
    pub fn marker(&self, label: usize) -> Option<usize> {
        (label < self.0.len()).then_some(label + 1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self(vec![
            "small-target".to_string(),
            "large-target".to_string(),
            "other-target".to_string(),
        ])
    }
}

/// Everything the classifier needs apart from the images themselves.
///
/// Defaults: an 11x11 smoothing kernel, a 21-pixel adaptive threshold block
/// with bias 5, a 7x7 closing element and an open area band of (5, 5000).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Reference images, one per category, in label order
    pub references: Vec<PathBuf>,
    pub categories: CategoryTable,
    pub blur_kernel: u32,
    pub threshold_block: u32,
    pub threshold_bias: i32,
    pub closing_kernel: u32,
    pub min_area: f64,
    pub max_area: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            references: vec![
                PathBuf::from("cat1.jpg"),
                PathBuf::from("cat2.jpg"),
                PathBuf::from("cat3.jpg"),
            ],
            categories: CategoryTable::default(),
            blur_kernel: 11,
            threshold_block: 21,
            threshold_bias: 5,
            closing_kernel: 7,
            min_area: 5.0,
            max_area: 5000.0,
        }
    }
}

impl ClassifierConfig {
    /// Load a JSON config; missing fields fall back to the defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_references(mut self, references: Vec<PathBuf>) -> Self {
        self.references = references;
        self
    }

    pub fn with_categories(mut self, categories: CategoryTable) -> Self {
        self.categories = categories;
        self
    }

    /// Check the config before any image is touched
    pub fn validate(&self) -> Result<()> {
        if self.references.is_empty() {
            return Err(ClassifyError::invalid(
                "references",
                "at least one reference image is required",
            ));
        }
        if self.categories.len() != self.references.len() {
            return Err(ClassifyError::CategoryCountMismatch {
                categories: self.categories.len(),
                references: self.references.len(),
            });
        }

        check_odd("blur_kernel", self.blur_kernel, 1)?;
        check_odd("threshold_block", self.threshold_block, 3)?;
        check_odd("closing_kernel", self.closing_kernel, 1)?;

        if self.closing_kernel / 2 > u8::MAX as u32 {
            return Err(ClassifyError::invalid(
                "closing_kernel",
                format!("{} is too large", self.closing_kernel),
            ));
        }
        if !(self.min_area >= 0.0) {
            return Err(ClassifyError::invalid(
                "min_area",
                format!("{} must be non-negative", self.min_area),
            ));
        }
        if !(self.min_area < self.max_area) {
            return Err(ClassifyError::invalid(
                "max_area",
                format!("{} must exceed min_area {}", self.max_area, self.min_area),
            ));
        }

        Ok(())
    }

    /// Strict open-interval test used to discard candidate outlines
    pub fn area_in_band(&self, area: f64) -> bool {
        self.min_area < area && area < self.max_area
    }
}

fn check_odd(parameter: &'static str, value: u32, minimum: u32) -> Result<()> {
    if value < minimum || value % 2 == 0 {
        return Err(ClassifyError::invalid(
            parameter,
            format!("{value} must be odd and at least {minimum}"),
        ));
    }
    Ok(())
}
