use std::collections::{BTreeSet, HashMap};

use crate::error::CoreError;
use crate::models::field::{FieldDecl, FieldKind};
use crate::models::value::FieldValue;

/// In-memory values of every form field, plus the snapshot of default
/// values used to tell which fields the user never touched.
#[derive(Debug, Clone)]
pub struct FieldStore {
    decls: Vec<FieldDecl>,
    index: HashMap<String, usize>,
    values: Vec<FieldValue>,
    defaults: Option<Vec<FieldValue>>,
}

impl FieldStore {
    /// Create a store holding each field's declared default.
    pub fn new(decls: Vec<FieldDecl>) -> Result<Self, CoreError> {
        let mut index = HashMap::with_capacity(decls.len());
        for (i, decl) in decls.iter().enumerate() {
            decl.check(&decl.default)?;
            if index.insert(decl.name.clone(), i).is_some() {
                return Err(CoreError::DuplicateField(decl.name.clone()));
            }
        }
        let values = decls.iter().map(|d| d.default.clone()).collect();
        Ok(Self {
            decls,
            index,
            values,
            defaults: None,
        })
    }

    fn position(&self, name: &str) -> Result<usize, CoreError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::UnknownField(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn decl(&self, name: &str) -> Option<&FieldDecl> {
        self.index.get(name).map(|&i| &self.decls[i])
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.index.get(name).map(|&i| &self.values[i])
    }

    /// Fields and their current values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDecl, &FieldValue)> {
        self.decls.iter().zip(self.values.iter())
    }

    /// Set a field from user input. Returns the previous value.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<FieldValue, CoreError> {
        let i = self.position(name)?;
        let decl = &self.decls[i];
        if decl.derived {
            return Err(CoreError::ReadOnlyField(name.to_string()));
        }
        decl.check(&value)?;
        Ok(std::mem::replace(&mut self.values[i], value))
    }

    /// Overwrite a derived field with a freshly computed value. Returns the previous value.
    pub fn overwrite_derived(
        &mut self,
        name: &str,
        value: FieldValue,
    ) -> Result<FieldValue, CoreError> {
        let i = self.position(name)?;
        let decl = &self.decls[i];
        if !decl.derived {
            return Err(CoreError::NotDerived(name.to_string()));
        }
        decl.check(&value)?;
        Ok(std::mem::replace(&mut self.values[i], value))
    }

    /// Restore a persisted value when a record is opened. Derived fields are
    /// accepted here; the caller recomputes them afterwards. Stored choice
    /// texts may predate the current option list and are taken as is.
    pub fn restore(&mut self, name: &str, value: FieldValue) -> Result<(), CoreError> {
        let i = self.position(name)?;
        let decl = &self.decls[i];
        match (&decl.kind, &value) {
            (FieldKind::Choice { .. }, FieldValue::Text(_)) => {}
            _ => decl.check(&value)?,
        }
        self.values[i] = value;
        Ok(())
    }

    /// Freeze the current values as the defaults. May be called only once,
    /// before any persisted or user-entered value is applied.
    pub fn snapshot_defaults(&mut self) -> Result<(), CoreError> {
        if self.defaults.is_some() {
            return Err(CoreError::DefaultsAlreadyCaptured);
        }
        self.defaults = Some(self.values.clone());
        Ok(())
    }

    pub fn defaults_captured(&self) -> bool {
        self.defaults.is_some()
    }

    /// Names of the fields whose current value equals the captured default.
    pub fn defaulted_names(&self) -> Result<BTreeSet<String>, CoreError> {
        let defaults = self.defaults.as_ref().ok_or(CoreError::DefaultsNotCaptured)?;
        Ok(self
            .decls
            .iter()
            .zip(self.values.iter().zip(defaults))
            .filter(|(_, (current, default))| current == default)
            .map(|(decl, _)| decl.name.clone())
            .collect())
    }
}
