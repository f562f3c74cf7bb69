//! Errors that abort the remainder of an import
//!
//! Recoverable conditions (unknown attribute pairs, numeric parse fallbacks,
//! stock-adjustment failures) never surface here; they degrade per the
//! documented fallback rules and are observable through logs only.

/// Fatal import failure
///
/// Checkpoints already committed for earlier template groups stand; the error
/// only covers the remainder of the run.
#[derive(Debug)]
pub enum ImportError {
    /// A unit of measure named in the spreadsheet does not exist in the catalog
    UomNotFound { name: String },
    /// A catalog repository operation failed
    Repository(anyhow::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::UomNotFound { name } => {
                write!(f, "Unit of Measure '{}' not found", name)
            }
            ImportError::Repository(err) => write!(f, "catalog repository error: {:#}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::UomNotFound { .. } => None,
            ImportError::Repository(err) => Some(err.as_ref()),
        }
    }
}

impl From<anyhow::Error> for ImportError {
    fn from(err: anyhow::Error) -> Self {
        ImportError::Repository(err)
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
