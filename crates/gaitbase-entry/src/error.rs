use std::fmt;

use thiserror::Error;

use gaitbase_core::error::CoreError;
use gaitbase_export::error::ExportError;
use gaitbase_rom::error::RomError;
use gaitbase_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the record failed. The session cannot be used.
    #[error("could not load ROM record {record_id}: {source}")]
    Load {
        record_id: i64,
        #[source]
        source: StorageError,
    },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Field(#[from] CoreError),

    #[error(transparent)]
    Form(#[from] RomError),

    #[error(transparent)]
    Report(#[from] ExportError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A write-through that failed. The in-memory value is kept and the write is
/// not retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteWarning {
    pub field: String,
    pub message: String,
    pub locked: bool,
}

impl WriteWarning {
    pub fn new(field: &str, err: &StorageError) -> Self {
        Self {
            field: field.to_string(),
            message: err.to_string(),
            locked: err.is_locked(),
        }
    }
}

impl fmt::Display for WriteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not save {}: {}", self.field, self.message)?;
        if self.locked {
            f.write_str(
                ". Close all other applications that may be using the database, and try again.",
            )?;
        }
        Ok(())
    }
}
