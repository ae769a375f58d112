//! Error types for icon generation

use thiserror::Error;

/// Result type alias for icon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing an icon
///
/// Malformed option *fields* are never errors: they are dropped and replaced
/// by defaults during resolution. The variants below cover the few places
/// where a caller-provided collaborator or input text is unusable.
#[derive(Error, Debug)]
pub enum Error {
    /// The drawing surface refused a resize or fill
    #[error("Surface error: {0}")]
    SurfaceError(String),

    /// A color string could not be converted to pixels
    #[error("Invalid color: {0}")]
    ColorError(String),

    /// Options text could not be parsed at all
    #[error("Invalid options: {0}")]
    OptionsError(String),

    /// I/O failure while writing rendered output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::OptionsError(err.to_string())
    }
}
