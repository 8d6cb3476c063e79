use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationReport;

/// Fatal conditions of a validagen run.
///
/// None of these are retried: each one is a configuration or environment
/// problem that the user has to fix.
#[derive(Debug, Error)]
pub enum ValidagenError {
    /// The configuration file could not be read or decoded into the rule model.
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// The decoded model violates a structural invariant.
    #[error("invalid validator configuration:\n{0}")]
    Validation(ValidationReport),

    /// The selected template could not be loaded or parsed.
    #[error("template error ({name}): {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Rendering one type through the template failed.
    #[error("failed to render validator `{key}`: {source}")]
    Render {
        key: String,
        #[source]
        source: minijinja::Error,
    },

    /// Reading or writing a file failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The starter configuration could not be produced.
    #[error("scaffold error: {0}")]
    Scaffold(String),
}

impl ValidagenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ValidagenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for validagen operations.
pub type Result<T> = std::result::Result<T, ValidagenError>;
