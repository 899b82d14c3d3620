//! Common error types for soundboard conversion

use thiserror::Error;

/// Common result type for soundboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading, classifying or writing soundboards
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file is not valid TOML or does not match the soundboard layout
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Soundboard could not be rendered as TOML
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Input file is not valid TOML (document-preserving parse)
    #[error("TOML document error: {0}")]
    TomlEdit(#[from] toml_edit::TomlError),

    /// JSON parse or serialize error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("Unsupported soundboard format: {0}")]
    UnsupportedFormat(String),

    /// Sound list is laid out in a way the in-place editor cannot follow
    #[error("Unsupported soundboard layout: {0}")]
    Layout(String),

    /// Sound has neither a legacy `path` nor a `source`
    #[error("Sound has no path and no source")]
    MissingPath,

    /// Path names a video host but no video id could be captured
    #[error("No video id found in {0:?}")]
    VideoIdNotFound(String),

    /// Failure while converting a single sound, with its position in the batch
    #[error("Sound #{index} ({name:?}) could not be converted")]
    Record {
        index: usize,
        name: String,
        #[source]
        cause: Box<Error>,
    },
}
