use thiserror::Error;

use crate::models::field::Affinity;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("duplicate field declaration: {0}")]
    DuplicateField(String),

    #[error("field '{0}' is computed automatically and cannot be edited")]
    ReadOnlyField(String),

    #[error("field '{0}' is not a derived field")]
    NotDerived(String),

    #[error("value {value} does not fit field '{name}' ({affinity:?})")]
    KindMismatch {
        name: String,
        affinity: Affinity,
        value: String,
    },

    #[error("'{value}' is not an allowed choice for field '{name}'")]
    InvalidChoice { name: String, value: String },

    #[error("could not parse '{input}' as a number for field '{name}'")]
    InvalidNumber { name: String, input: String },

    #[error("default values have already been captured")]
    DefaultsAlreadyCaptured,

    #[error("default values have not been captured yet")]
    DefaultsNotCaptured,
}
