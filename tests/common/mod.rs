mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shapeclass for tests
pub use shapeclass::{
    AreaMatcher, CategoryTable, ClassificationPipeline, ClassifierConfig, ClassifyError,
    ContourExtractor, Outline, ReferenceLoader, ReferenceSet,
};
