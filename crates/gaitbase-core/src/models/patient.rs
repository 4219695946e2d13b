use serde::{Deserialize, Serialize};

/// Identifying data from the `patients` table. Read once when a ROM is
/// opened and never written by the entry form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub firstname: String,
    pub lastname: String,
    pub ssn: String,
    pub patient_code: String,
    pub diagnosis: String,
}

impl PatientInfo {
    /// Column names in the `patients` table, in the order of [`PatientInfo::fields`].
    pub const COLUMNS: [&'static str; 5] =
        ["firstname", "lastname", "ssn", "patient_code", "diagnosis"];

    /// Placeholder name and value pairs for reports.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("firstname", &self.firstname),
            ("lastname", &self.lastname),
            ("ssn", &self.ssn),
            ("patient_code", &self.patient_code),
            ("diagnosis", &self.diagnosis),
        ]
    }
}
