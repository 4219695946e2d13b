use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::models::value::FieldValue;

use crate::error::StorageError;

/// Row-level access to the `roms` table, keyed by ROM id.
pub trait RecordStore {
    /// Read `fields` of one record. Returns one entry per field, `None`
    /// where nothing is stored.
    fn select(&self, record_id: i64, fields: &[&str]) -> Result<Vec<Option<FieldValue>>, StorageError>;

    /// Write `values` to `fields` of one record.
    fn update(&mut self, record_id: i64, fields: &[&str], values: &[FieldValue]) -> Result<(), StorageError>;

    /// Identifying data of the patient the record belongs to.
    fn patient(&self, record_id: i64) -> Result<PatientInfo, StorageError>;
}

/// Check that `name` can be used as a column name in generated SQL.
pub fn check_column(name: &str) -> Result<(), StorageError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidColumn(name.to_string()))
    }
}

pub(crate) fn check_lengths(fields: &[&str], values: &[FieldValue]) -> Result<(), StorageError> {
    if fields.len() == values.len() {
        Ok(())
    } else {
        Err(StorageError::LengthMismatch {
            fields: fields.len(),
            values: values.len(),
        })
    }
}
