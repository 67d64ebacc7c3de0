//! Error types for the build pipeline.

use std::path::PathBuf;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a build.
///
/// Problems with individual sources are not errors; they are reported as
/// [`Skipped`](crate::Skipped) entries and logged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read the configuration file.
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for [`Config`](crate::Config).
    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to save the UFO.
    #[error("Failed to write UFO: {0}")]
    FontWrite(#[from] norad::error::FontWriteError),

    /// A glyph name the UFO layer refuses.
    #[error("Invalid glyph name: {0}")]
    Naming(#[from] norad::error::NamingError),

    /// A glyph codepoint that is not a Unicode scalar value.
    #[error("Invalid codepoint U+{0:04X}")]
    InvalidCodepoint(u32),
}
