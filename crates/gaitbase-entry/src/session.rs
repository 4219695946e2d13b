use std::path::{Path, PathBuf};

use gaitbase_core::error::CoreError;
use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::models::value::FieldValue;
use gaitbase_core::store::FieldStore;
use gaitbase_core::validate::{validate_date, DATE_FORMAT};
use gaitbase_export::data::ReportData;
use gaitbase_export::render::Renderer;
use gaitbase_export::template::TextTemplate;
use gaitbase_export::xlsx::{self, Spreadsheet};
use gaitbase_rom::{RomForm, DATE_FIELD};
use gaitbase_storage::error::StorageError;
use gaitbase_storage::record::RecordStore;

use crate::backup;
use crate::error::{SessionError, WriteWarning};

const INVALID_DATE: &str = "Päivämäärän täytyy olla oikea ja muodossa pp.kk.vvvv";

/// Result of a single edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// Value before the edit.
    pub previous: FieldValue,
    /// Derived fields recomputed because of the edit, in update order.
    pub recomputed: Vec<String>,
    /// Write-throughs that failed.
    pub warnings: Vec<WriteWarning>,
}

/// Editing session of one ROM record.
///
/// Every change is written through to the store before the call returns,
/// together with any derived fields it affected.
pub struct EntrySession<'f, S: RecordStore> {
    form: &'f RomForm,
    store: S,
    record_id: i64,
    newly_created: bool,
    fields: FieldStore,
    patient: PatientInfo,
    backup_dir: Option<PathBuf>,
    open_warnings: Vec<WriteWarning>,
}

impl<'f, S: RecordStore> EntrySession<'f, S> {
    /// Open a record for editing.
    ///
    /// Defaults are captured from the form declarations before anything is
    /// read. An existing record is then loaded from the store; a newly
    /// created one gets today's date instead. Load failures are fatal.
    pub fn open(form: &'f RomForm, store: S, record_id: i64, newly_created: bool) -> Result<Self, SessionError> {
        let mut fields = form.new_store()?;
        fields.snapshot_defaults()?;
        let patient = store
            .patient(record_id)
            .map_err(|source| SessionError::Load { record_id, source })?;

        let mut session = Self {
            form,
            store,
            record_id,
            newly_created,
            fields,
            patient,
            backup_dir: None,
            open_warnings: Vec::new(),
        };
        if newly_created {
            let today = jiff::Zoned::now().date().strftime(DATE_FORMAT).to_string();
            let outcome = session.edit(DATE_FIELD, FieldValue::Text(today))?;
            session.open_warnings = outcome.warnings;
        } else {
            session.load()?;
        }
        tracing::info!(rom_id = record_id, newly_created, "entry session opened");
        Ok(session)
    }

    /// Write a JSON backup into `dir` when a newly created record is closed.
    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(dir.into());
        self
    }

    fn load(&mut self) -> Result<(), SessionError> {
        let record_id = self.record_id;
        let form = self.form;
        let names: Vec<&str> = form.fields().iter().map(|f| f.name.as_str()).collect();
        let values = self
            .store
            .select(record_id, &names)
            .map_err(|source| SessionError::Load { record_id, source })?;

        // NULL columns keep their default
        for (name, value) in names.iter().zip(values) {
            let Some(value) = value else { continue };
            self.fields.restore(name, value).map_err(|e| SessionError::Load {
                record_id,
                source: StorageError::SchemaMismatch {
                    detail: e.to_string(),
                },
            })?;
        }

        // derived values stored by an older form may be stale
        let changed = form.engine().recompute_all(&mut self.fields)?;
        let mut warnings = Vec::new();
        for name in &changed {
            self.write_through(name, &mut warnings);
        }
        self.open_warnings = warnings;
        Ok(())
    }

    fn write_through(&mut self, name: &str, warnings: &mut Vec<WriteWarning>) {
        let Some(value) = self.fields.get(name).cloned() else {
            return;
        };
        if let Err(e) = self.store.update(self.record_id, &[name], &[value]) {
            tracing::warn!(field = %name, rom_id = self.record_id, error = %e, "write-through failed");
            warnings.push(WriteWarning::new(name, &e));
        }
    }

    /// Set a field, write it through and update everything derived from it.
    pub fn edit(&mut self, name: &str, value: FieldValue) -> Result<EditOutcome, SessionError> {
        let previous = self.fields.set(name, value)?;
        let mut warnings = Vec::new();
        self.write_through(name, &mut warnings);

        let recomputed = self.form.engine().on_change(&mut self.fields, name)?;
        for target in &recomputed {
            self.write_through(target, &mut warnings);
        }
        Ok(EditOutcome {
            previous,
            recomputed,
            warnings,
        })
    }

    /// Like [`edit`](Self::edit), parsing `input` as typed into the form.
    pub fn edit_input(&mut self, name: &str, input: &str) -> Result<EditOutcome, SessionError> {
        let decl = self
            .fields
            .decl(name)
            .ok_or_else(|| CoreError::UnknownField(name.to_string()))?;
        let value = decl.parse_input(input)?;
        self.edit(name, value)
    }

    /// Write-throughs that failed while the session was opened.
    pub fn open_warnings(&self) -> &[WriteWarning] {
        &self.open_warnings
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn patient(&self) -> &PatientInfo {
        &self.patient
    }

    pub fn record_id(&self) -> i64 {
        self.record_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Current unit of a field. Fields without a numeric value have none.
    pub fn units(&self, name: &str) -> Option<&str> {
        let decl = self.fields.decl(name)?;
        let value = self.fields.get(name)?;
        Some(decl.unit_for(value))
    }

    /// Field and patient data for a report.
    pub fn report_data(&self, include_units: bool) -> Result<ReportData, SessionError> {
        Ok(ReportData::from_store(&self.fields, include_units)?.with_patient(&self.patient))
    }

    pub fn text_report(
        &self,
        template: &TextTemplate,
        renderer: &Renderer,
        include_units: bool,
    ) -> Result<String, SessionError> {
        let data = self.report_data(include_units)?;
        Ok(renderer.render(&template.blocks, data.values(), data.defaulted())?)
    }

    pub fn xlsx_report(&self, template: &Path, renderer: &Renderer) -> Result<Spreadsheet, SessionError> {
        let data = self.report_data(false)?;
        Ok(xlsx::render_workbook(template, &data, renderer)?)
    }

    /// Check the record before closing.
    pub fn validate(&self) -> Result<(), SessionError> {
        let date = self
            .fields
            .get(DATE_FIELD)
            .map(ToString::to_string)
            .unwrap_or_default();
        if !validate_date(&date) {
            return Err(SessionError::Validation(INVALID_DATE.to_string()));
        }
        Ok(())
    }

    /// Finish the session. Unless `force` is set, an invalid record refuses
    /// to close. Returns the path of the JSON backup, if one was written.
    pub fn close(&self, force: bool) -> Result<Option<PathBuf>, SessionError> {
        if !force {
            self.validate()?;
        }
        let backup = match (&self.backup_dir, self.newly_created) {
            (Some(dir), true) => {
                let now = jiff::Zoned::now().datetime();
                match backup::write_backup(dir, &self.fields, &self.patient, now) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!(dir = %dir.display(), error = %e, "JSON backup failed");
                        None
                    }
                }
            }
            _ => None,
        };
        tracing::info!(rom_id = self.record_id, "entry session closed");
        Ok(backup)
    }
}
