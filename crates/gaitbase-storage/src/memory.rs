use std::collections::{BTreeSet, HashMap};

use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::models::value::FieldValue;

use crate::error::StorageError;
use crate::record::{check_lengths, RecordStore};

#[derive(Debug, Clone, Default)]
struct Row {
    patient: PatientInfo,
    values: HashMap<String, FieldValue>,
}

/// Map-backed [`RecordStore`] with a fixed set of columns.
///
/// Writes can be made to fail on demand, and every successful write is
/// logged, which is what the session tests look at.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    columns: BTreeSet<String>,
    rows: HashMap<i64, Row>,
    fail_writes: bool,
    writes: Vec<(i64, String, FieldValue)>,
}

impl MemoryStore {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add an empty record.
    pub fn insert_record(&mut self, record_id: i64, patient: PatientInfo) {
        self.rows.insert(
            record_id,
            Row {
                patient,
                values: HashMap::new(),
            },
        );
    }

    /// Store a value directly, bypassing the write log and failure switch.
    pub fn put(&mut self, record_id: i64, field: &str, value: FieldValue) {
        if let Some(row) = self.rows.get_mut(&record_id) {
            row.values.insert(field.to_string(), value);
        }
    }

    /// Make every following `update` fail, as a locked database would.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Successful writes, oldest first.
    pub fn writes(&self) -> &[(i64, String, FieldValue)] {
        &self.writes
    }

    fn check_columns(&self, fields: &[&str]) -> Result<(), StorageError> {
        match fields.iter().find(|f| !self.columns.contains(**f)) {
            Some(missing) => Err(StorageError::SchemaMismatch {
                detail: format!("no such column: {missing}"),
            }),
            None => Ok(()),
        }
    }
}

impl RecordStore for MemoryStore {
    fn select(&self, record_id: i64, fields: &[&str]) -> Result<Vec<Option<FieldValue>>, StorageError> {
        self.check_columns(fields)?;
        let row = self
            .rows
            .get(&record_id)
            .ok_or(StorageError::RecordNotFound { record_id })?;
        Ok(fields.iter().map(|f| row.values.get(*f).cloned()).collect())
    }

    fn update(&mut self, record_id: i64, fields: &[&str], values: &[FieldValue]) -> Result<(), StorageError> {
        check_lengths(fields, values)?;
        self.check_columns(fields)?;
        if self.fail_writes {
            return Err(StorageError::WriteRejected("database is locked".to_string()));
        }
        let row = self
            .rows
            .get_mut(&record_id)
            .ok_or(StorageError::RecordNotFound { record_id })?;
        for (field, value) in fields.iter().zip(values) {
            row.values.insert(field.to_string(), value.clone());
            self.writes.push((record_id, field.to_string(), value.clone()));
        }
        Ok(())
    }

    fn patient(&self, record_id: i64) -> Result<PatientInfo, StorageError> {
        self.rows
            .get(&record_id)
            .map(|row| row.patient.clone())
            .ok_or(StorageError::PatientNotFound { record_id })
    }
}
