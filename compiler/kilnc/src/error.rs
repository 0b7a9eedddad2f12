//! Errors that stop a whole run.
//!
//! Problems with a single type never end up here; they are diagnostics
//! embedded in that type's unit.

use std::io;
use std::path::PathBuf;

use kiln_diagnostic::ErrorCode;
use kiln_model::{ConfigError, ModelError};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bad command line.
    #[error("{0}")]
    Usage(String),
}

impl DriverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DriverError::Io {
            path: path.into(),
            source,
        }
    }

    /// Code documented by `kiln --explain`, when there is one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            DriverError::Model(ModelError::MissingWellKnownType { .. }) => Some(ErrorCode::K0001),
            DriverError::Model(_) => Some(ErrorCode::K0003),
            DriverError::Config(_) => Some(ErrorCode::K0002),
            DriverError::Io { .. } | DriverError::Usage(_) => None,
        }
    }
}
