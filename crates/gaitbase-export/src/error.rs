use thiserror::Error;

use gaitbase_core::error::CoreError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("template references unknown field: {name}")]
    MissingField { name: String },

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("XLSX report failed: {0}")]
    Xlsx(#[from] umya_spreadsheet::XlsxError),

    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("field store error: {0}")]
    Store(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
