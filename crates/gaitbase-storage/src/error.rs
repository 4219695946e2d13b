use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("ROM record not found: {record_id}")]
    RecordNotFound { record_id: i64 },

    #[error("patient not found for ROM record {record_id}")]
    PatientNotFound { record_id: i64 },

    #[error(
        "could not read all variables from the database ({detail}); \
         this may be due to a mismatch between the form fields and the database schema"
    )]
    SchemaMismatch { detail: String },

    #[error("invalid column name: {0}")]
    InvalidColumn(String),

    #[error("{fields} fields but {values} values given")]
    LengthMismatch { fields: usize, values: usize },

    #[error("unsupported stored value in column '{column}'")]
    UnsupportedValue { column: String },

    #[error("write rejected: {0}")]
    WriteRejected(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StorageError {
    /// Whether the database reported a lock held by another connection.
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            StorageError::Sqlite(rusqlite::Error::SqliteFailure(e, _))
                if matches!(
                    e.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                )
        )
    }
}
