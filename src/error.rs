use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The file is missing, unreadable, or not a decodable raster image
    #[error("Failed to decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Category table has {categories} entries but {references} reference images are configured")]
    CategoryCountMismatch { categories: usize, references: usize },

    #[error("Invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to save image: {0}")]
    ImageSave(image::ImageError),
}

impl ClassifyError {
    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::ImageDecode {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
