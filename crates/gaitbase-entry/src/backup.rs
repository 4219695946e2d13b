use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::store::FieldStore;

use crate::error::SessionError;

/// `<code>_<Last><First>_<YYYY_MM_DD_HH_MM_SS>.json`
pub fn backup_file_name(patient: &PatientInfo, at: jiff::civil::DateTime) -> String {
    format!(
        "{}_{}{}_{}.json",
        patient.patient_code,
        patient.lastname,
        patient.firstname,
        at.strftime("%Y_%m_%d_%H_%M_%S"),
    )
}

/// Every field plus the patient data, keyed by name. Patient data wins on a
/// name clash.
pub fn backup_document(fields: &FieldStore, patient: &PatientInfo) -> BTreeMap<String, serde_json::Value> {
    let mut doc: BTreeMap<String, serde_json::Value> = fields
        .iter()
        .map(|(decl, value)| (decl.name.clone(), value.to_json()))
        .collect();
    for (name, value) in patient.fields() {
        doc.insert(name.to_string(), serde_json::Value::String(value.to_string()));
    }
    doc
}

/// Write the backup into `dir` and return its path. Existing files are
/// overwritten; the timestamp keeps names unique in practice.
pub fn write_backup(
    dir: &Path,
    fields: &FieldStore,
    patient: &PatientInfo,
    at: jiff::civil::DateTime,
) -> Result<PathBuf, SessionError> {
    let path = dir.join(backup_file_name(patient, at));
    let json = serde_json::to_string_pretty(&backup_document(fields, patient))?;
    std::fs::write(&path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "wrote JSON backup");
    Ok(path)
}
