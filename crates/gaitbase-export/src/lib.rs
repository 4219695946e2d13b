//! gaitbase-export
//!
//! Reports from ROM data: conditional text templates, XLSX templates and
//! DOCX output.

pub mod config;
pub mod data;
pub mod docx;
pub mod error;
pub mod render;
pub mod styles;
pub mod template;
pub mod xlsx;
