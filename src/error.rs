use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the pipelines. Each invocation is a single batch
/// pass over local files, so every kind is fatal and none is retried.
#[derive(Error, Debug)]
pub enum Error {
    #[error("variant-call source not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("malformed variant-call source {}: {}", .path.display(), .msg)]
    MalformedSource { path: PathBuf, msg: String },

    #[error("no column matching identifier pattern `{}` in {}", .pattern, .path.display())]
    NoIdentifierColumn { pattern: String, path: PathBuf },

    #[error("feature report lacks required column `{name}`")]
    MissingColumn { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
