use serde::{Deserialize, Serialize};

/// Fonts and sizes of the DOCX report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    /// Font for report text (e.g. "Calibri").
    pub body_font: String,

    /// Font for the title.
    pub heading_font: String,

    /// Report text size in points.
    pub body_size: usize,

    /// Title size in points.
    pub title_size: usize,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Calibri".to_string(),
            body_size: 11,
            title_size: 16,
        }
    }
}
