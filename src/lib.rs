//! Shape-based object classification by nearest reference area.
//!
//! Reference silhouettes are loaded once into a [`ReferenceSet`]; each query
//! image is thresholded, traced, filtered by area and every surviving outline
//! is labelled with the reference whose enclosed area is closest.

pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;

pub use config::{CategoryTable, ClassifierConfig};
pub use detection::{AreaMatcher, ClassificationPipeline, ContourExtractor, ReferenceLoader};
pub use error::{ClassifyError, Result};
pub use models::{Classification, DetectedObject, Outline, ReferenceLabel, ReferenceSet};
pub use pipeline::{Pipeline, PipelineStep};
