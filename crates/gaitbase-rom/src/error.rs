use thiserror::Error;

use gaitbase_core::error::CoreError;

#[derive(Debug, Error)]
pub enum RomError {
    #[error("binding for '{target}' refers to undeclared field '{field}'")]
    UndeclaredField { target: String, field: String },

    #[error("field '{0}' is not declared as derived")]
    NotDerived(String),

    #[error("derived field '{target}' needs at least two inputs, got {count}")]
    TooFewInputs { target: String, count: usize },

    #[error("derived field '{0}' already has a binding")]
    DuplicateBinding(String),

    #[error("binding for '{target}' would create a cycle through '{via}'")]
    Cycle { target: String, via: String },

    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("field store error: {0}")]
    Store(#[from] CoreError),
}
