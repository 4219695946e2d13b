//! gaitbase-core
//!
//! Field model, field store and input validation for the ROM entry form.
//! Shared vocabulary of the gaitbase crates, with no database or GUI
//! dependency.

pub mod error;
pub mod models;
pub mod store;
pub mod validate;
