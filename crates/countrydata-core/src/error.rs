// crates/countrydata-core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failure reaching the upstream provider or decoding its answer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The provider answered with a non-2xx status.
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not a JSON array of country objects.
    #[error("could not decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The existing dataset could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid dataset", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The merge step rejected its inputs. Nothing is written when this occurs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// A required upstream field is absent. `country` is the ISO3 code when
    /// known, otherwise `#<index>` into the snapshot.
    #[error("upstream record {country} is missing required field `{field}`")]
    MissingField { country: String, field: &'static str },

    /// `metadata.version` of the existing dataset is not a decimal number, or
    /// is too large to grow by one step.
    #[error("bad version: {found:?} cannot be incremented")]
    BadVersion { found: String },

    /// The snapshot lists the same ISO3 code twice.
    #[error("upstream snapshot lists {code} more than once")]
    DuplicateCode { code: String },
}

/// The new dataset could not be persisted. The previous file is left intact.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("could not write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize dataset")]
    Serialize(#[from] serde_json::Error),
}

/// Any failure of a refresh run.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

pub type Result<T, E = RefreshError> = std::result::Result<T, E>;
