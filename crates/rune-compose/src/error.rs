//! Errors at the JSON boundary of the composer.

use rune_style::InvalidStyleInput;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DescriptorError>;

/// Errors raised while reading or writing component descriptors.
///
/// Composition itself never fails.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The document is not valid JSON or does not match the descriptor shape.
    #[error("invalid descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A style override holds a value that is not a style.
    #[error("invalid style at `{path}`: {source}")]
    InvalidStyle {
        path: String,
        #[source]
        source: InvalidStyleInput,
    },
}
