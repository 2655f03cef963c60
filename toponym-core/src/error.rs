use std::path::PathBuf;

use thiserror::Error;

/// The query holds no usable location information.
///
/// Recovered inside [`crate::suggest::suggest`], which answers with the
/// [`crate::NO_SUGGESTION`] sentinel instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("location name carries no signal")]
pub struct NoSignal;

#[derive(Debug, Error)]
#[error("gazetteer unavailable at {path:?}: {cause}")]
pub struct GazetteerUnavailable {
    pub path: PathBuf,
    #[source]
    pub cause: LoadFailure,
}

#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot decode csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot decode spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("cannot decode json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing column {0:?}")]
    MissingColumn(String),
    #[error("unsupported file extension {0:?}")]
    UnsupportedFormat(String),
}

impl GazetteerUnavailable {
    pub fn new(path: impl Into<PathBuf>, cause: impl Into<LoadFailure>) -> Self {
        Self {
            path: path.into(),
            cause: cause.into(),
        }
    }
}
