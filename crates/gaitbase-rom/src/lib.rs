//! gaitbase-rom
//!
//! The range-of-motion form: its sections and fields, and the derived
//! fields computed from them. Pure data and arithmetic.

pub mod derived;
pub mod error;
pub mod scoring;
pub mod sections;

use std::collections::BTreeMap;

use gaitbase_core::error::CoreError;
use gaitbase_core::models::field::{Affinity, FieldDecl};
use gaitbase_core::store::FieldStore;

use derived::DerivedEngine;
use error::RomError;

/// Name of the body weight field used for weight normalization.
pub const WEIGHT_FIELD: &str = "AntropPaino";

/// Name of the examination date field.
pub const DATE_FIELD: &str = "TiedotPvm";

/// Suffix of weight-normalized (derived) fields.
pub const NORMALIZED_SUFFIX: &str = "Norm";

/// Suffix of the raw counterpart of a weight-normalized field.
pub const UNNORMALIZED_SUFFIX: &str = "NormUn";

/// Trait implemented by each tab of the ROM form.
pub trait Section: Send + Sync {
    /// Unique identifier for this section (e.g., "hip", "scale").
    fn id(&self) -> &str;

    /// Human-readable name as shown on the tab (e.g., "Lonkka").
    fn name(&self) -> &str;

    /// Fields entered on this section, in tab order.
    fn fields(&self) -> &[FieldDecl];

    /// Name of the field that takes focus when the tab is opened.
    fn first_field(&self) -> Option<&str> {
        self.fields().first().map(|f| f.name.as_str())
    }
}

/// Return all sections, in tab order.
pub fn all_sections() -> Vec<Box<dyn Section>> {
    vec![
        Box::new(sections::info::Info),
        Box::new(sections::questionnaire::Questionnaire),
        Box::new(sections::anthropometrics::Anthropometrics),
        Box::new(sections::hip::Hip),
        Box::new(sections::ankle::Ankle),
        Box::new(sections::knee::Knee),
        Box::new(sections::isokinetics::Isokinetics),
        Box::new(sections::malalignment::Malalignment),
        Box::new(sections::balance::Balance),
        Box::new(sections::scale::Scale),
    ]
}

/// Look up a section by ID.
pub fn get_section(id: &str) -> Result<Box<dyn Section>, RomError> {
    all_sections()
        .into_iter()
        .find(|s| s.id() == id)
        .ok_or_else(|| RomError::UnknownSection(id.to_string()))
}

/// The complete form: every field declaration plus the derived-field graph.
pub struct RomForm {
    fields: Vec<FieldDecl>,
    engine: DerivedEngine,
}

impl RomForm {
    /// Build a form from declarations and register its derived fields.
    ///
    /// Every field ending in `Norm` is the weight-normalized version of the
    /// matching `NormUn` field. SCALE limb totals are registered by
    /// [`sections::scale::register_totals`].
    pub fn new(fields: Vec<FieldDecl>) -> Result<Self, RomError> {
        let mut engine = DerivedEngine::new(&fields);
        for decl in fields.iter().filter(|d| d.name.ends_with(NORMALIZED_SUFFIX)) {
            let base = &decl.name[..decl.name.len() - NORMALIZED_SUFFIX.len()];
            let raw = format!("{base}{UNNORMALIZED_SUFFIX}");
            engine.register(&decl.name, &[raw.as_str(), WEIGHT_FIELD], scoring::weight_normalized)?;
        }
        sections::scale::register_totals(&mut engine, &fields)?;
        tracing::debug!(
            fields = fields.len(),
            derived = engine.len(),
            "ROM form initialized"
        );
        Ok(Self { fields, engine })
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn engine(&self) -> &DerivedEngine {
        &self.engine
    }

    /// A field store holding every field at its declared default.
    pub fn new_store(&self) -> Result<FieldStore, CoreError> {
        FieldStore::new(self.fields.clone())
    }

    /// Storage affinity of every variable, keyed by name.
    pub fn variable_affinities(&self) -> BTreeMap<String, Affinity> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.affinity()))
            .collect()
    }
}

/// The ROM form made of [`all_sections`].
pub fn rom_form() -> Result<RomForm, RomError> {
    let fields = all_sections()
        .iter()
        .flat_map(|s| s.fields().iter().cloned())
        .collect();
    RomForm::new(fields)
}
