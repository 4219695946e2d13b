use std::collections::{BTreeMap, BTreeSet};

use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::store::FieldStore;

use crate::error::ExportError;

/// Values handed to the renderer: display text per name, plus the names
/// still at their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportData {
    values: BTreeMap<String, String>,
    defaulted: BTreeSet<String>,
}

impl ReportData {
    /// Snapshot a field store. Numbers are rounded to their declared
    /// decimals. With `include_units`, numeric values get their unit
    /// appended (`"12°"`, `"34 kg"`).
    pub fn from_store(store: &FieldStore, include_units: bool) -> Result<Self, ExportError> {
        let values = store
            .iter()
            .map(|(decl, value)| {
                let mut text = decl.display(value);
                if include_units {
                    text.push_str(decl.unit_for(value));
                }
                (decl.name.clone(), text)
            })
            .collect();
        Ok(Self {
            values,
            defaulted: store.defaulted_names()?,
        })
    }

    /// Add patient fields. Patient data is never considered defaulted.
    pub fn with_patient(mut self, patient: &PatientInfo) -> Self {
        for (name, value) in patient.fields() {
            self.insert(name, value);
        }
        self
    }

    /// Set a value, which also marks it as not defaulted.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.defaulted.remove(&name);
        self.values.insert(name, value.into());
    }

    /// Mark a name as still at its default.
    pub fn mark_defaulted(&mut self, name: impl Into<String>) {
        self.defaulted.insert(name.into());
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn defaulted(&self) -> &BTreeSet<String> {
        &self.defaulted
    }
}
