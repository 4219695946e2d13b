//! gaitbase-entry library root.
//!
//! The ROM editing session and its configuration, shared by the `gaitbase`
//! binary and the integration tests.

pub mod backup;
pub mod config;
pub mod error;
pub mod session;
