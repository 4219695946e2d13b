use std::path::Path;
use std::time::Duration;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use gaitbase_core::models::field::FieldDecl;
use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::models::value::{FieldValue, NO_VALUE_TEXT};

use crate::error::StorageError;
use crate::record::{check_column, check_lengths, RecordStore};

/// SQLite backend: a `patients` table and a `roms` table with one column
/// per form field.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref())?;
        conn.busy_timeout(Duration::from_secs(5))?;
        tracing::debug!(path = %path.as_ref().display(), "opened ROM database");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the `patients` and `roms` tables if they do not exist. Column
    /// types follow each field's affinity.
    pub fn init_schema(&self, fields: &[FieldDecl]) -> Result<(), StorageError> {
        let mut columns = String::new();
        for field in fields {
            check_column(&field.name)?;
            columns.push_str(&format!(",\n  {} {}", field.name, field.affinity().sql_type()));
        }

        self.conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS patients (
              patient_id INTEGER PRIMARY KEY,
              firstname TEXT,
              lastname TEXT,
              ssn TEXT,
              patient_code TEXT,
              diagnosis TEXT
            );

            CREATE TABLE IF NOT EXISTS roms (
              rom_id INTEGER PRIMARY KEY,
              patient_id INTEGER REFERENCES patients(patient_id){columns}
            );
            "#
        ))?;
        tracing::info!(columns = fields.len(), "database schema initialized");
        Ok(())
    }

    pub fn create_patient(&self, patient: &PatientInfo) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO patients (firstname, lastname, ssn, patient_code, diagnosis)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                patient.firstname,
                patient.lastname,
                patient.ssn,
                patient.patient_code,
                patient.diagnosis,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an empty ROM row for a patient and return its id.
    pub fn create_record(&self, patient_id: i64) -> Result<i64, StorageError> {
        self.conn
            .execute("INSERT INTO roms (patient_id) VALUES (?1)", params![patient_id])?;
        let rom_id = self.conn.last_insert_rowid();
        tracing::info!(rom_id, patient_id, "created ROM record");
        Ok(rom_id)
    }
}

fn to_sql(value: &FieldValue) -> Value {
    match value {
        FieldValue::Number(n) => Value::Real(*n),
        FieldValue::Text(t) => Value::Text(t.clone()),
        FieldValue::NoValue => Value::Text(NO_VALUE_TEXT.to_string()),
    }
}

fn from_sql(column: &str, value: Value) -> Result<Option<FieldValue>, StorageError> {
    Ok(match value {
        Value::Null => None,
        Value::Integer(i) => Some(FieldValue::Number(i as f64)),
        Value::Real(r) => Some(FieldValue::Number(r)),
        Value::Text(t) => Some(FieldValue::from_text(t)),
        Value::Blob(_) => {
            return Err(StorageError::UnsupportedValue {
                column: column.to_string(),
            });
        }
    })
}

/// SQLite reports unknown columns as a prepare failure. Column names are
/// left unquoted so that an unknown name cannot be read as a string literal.
fn schema_error(err: rusqlite::Error) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(_, Some(msg)) | rusqlite::Error::SqlInputError { msg, .. }
            if msg.contains("no such column") =>
        {
            StorageError::SchemaMismatch { detail: msg.clone() }
        }
        _ => StorageError::Sqlite(err),
    }
}

fn column_list(fields: &[&str]) -> Result<String, StorageError> {
    for field in fields {
        check_column(field)?;
    }
    Ok(fields.join(", "))
}

impl RecordStore for SqliteStore {
    fn select(&self, record_id: i64, fields: &[&str]) -> Result<Vec<Option<FieldValue>>, StorageError> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {} FROM roms WHERE rom_id = ?1", column_list(fields)?);
        let mut stmt = self.conn.prepare(&sql).map_err(schema_error)?;
        let raw: Option<Vec<Value>> = stmt
            .query_row(params![record_id], |row| {
                (0..fields.len()).map(|i| row.get::<_, Value>(i)).collect()
            })
            .optional()?;
        let raw = raw.ok_or(StorageError::RecordNotFound { record_id })?;

        fields
            .iter()
            .zip(raw)
            .map(|(field, value)| from_sql(field, value))
            .collect()
    }

    fn update(&mut self, record_id: i64, fields: &[&str], values: &[FieldValue]) -> Result<(), StorageError> {
        check_lengths(fields, values)?;
        if fields.is_empty() {
            return Ok(());
        }
        for field in fields {
            check_column(field)?;
        }
        let assignments = fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{f} = ?{}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE roms SET {assignments} WHERE rom_id = ?1");

        let bound = std::iter::once(Value::Integer(record_id)).chain(values.iter().map(to_sql));
        let changed = self
            .conn
            .execute(&sql, params_from_iter(bound))
            .map_err(schema_error)?;
        if changed == 0 {
            return Err(StorageError::RecordNotFound { record_id });
        }
        tracing::trace!(rom_id = record_id, ?fields, "record updated");
        Ok(())
    }

    fn patient(&self, record_id: i64) -> Result<PatientInfo, StorageError> {
        let patient = self
            .conn
            .query_row(
                "SELECT p.firstname, p.lastname, p.ssn, p.patient_code, p.diagnosis
                 FROM patients p JOIN roms r ON r.patient_id = p.patient_id
                 WHERE r.rom_id = ?1",
                params![record_id],
                |row| {
                    let text = |i: usize| -> rusqlite::Result<String> {
                        Ok(row.get::<_, Option<String>>(i)?.unwrap_or_default())
                    };
                    Ok(PatientInfo {
                        firstname: text(0)?,
                        lastname: text(1)?,
                        ssn: text(2)?,
                        patient_code: text(3)?,
                        diagnosis: text(4)?,
                    })
                },
            )
            .optional()?;
        patient.ok_or(StorageError::PatientNotFound { record_id })
    }
}
