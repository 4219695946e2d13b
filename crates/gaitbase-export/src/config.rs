use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Report rendering settings. Passed to the renderer when it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Text emitted for a conditional separator block.
    pub separator: String,

    /// Raw value -> display text, applied to every value before rendering
    /// (e.g. "Ei mitattu" -> "ei mitattu").
    pub replace_data: BTreeMap<String, String>,

    /// Find/replace pairs applied, in key order, to spreadsheet cells whose
    /// text was changed by substitution.
    pub xls_replace_strings: BTreeMap<String, String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            separator: ". ".to_string(),
            replace_data: BTreeMap::new(),
            xls_replace_strings: BTreeMap::new(),
        }
    }
}
