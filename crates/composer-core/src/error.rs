//! Typed failures raised by the composition engine

use crate::feature::Feature;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a scaffolding run can fail inside the engine.
///
/// None of these are transient: the same inputs always produce the same
/// error, so callers abort the run instead of retrying.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Two mutually exclusive features were requested together
    #[error("features '{first}' and '{second}' cannot be used together")]
    Conflict { first: Feature, second: Feature },

    /// A configuration scalar failed its shape check
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// An installer asked for a dependency missing from the version table
    #[error("dependency '{name}' has no pinned version (version table out of sync with installers)")]
    UnknownDependency { name: String },

    /// A template slot had no matching variant
    #[error("no template variant matched slot '{slot}'")]
    SelectionExhausted { slot: &'static str },

    /// A dependency was requested in one bucket while already declared in the other
    #[error("dependency '{name}' is already declared in the other dependency section")]
    BucketClash { name: String },

    /// The same dependency appeared twice in one merge request
    #[error("dependency '{name}' requested more than once in a single merge")]
    DuplicateDependency { name: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest at {}: {source}", path.display())]
    ManifestFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ComposeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ComposeError> = std::result::Result<T, E>;
