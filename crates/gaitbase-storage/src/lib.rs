//! gaitbase-storage
//!
//! Row-level persistence of ROM records. The entry session only sees the
//! [`record::RecordStore`] trait; SQLite is the production backend and the
//! in-memory store backs the tests.

pub mod error;
pub mod memory;
pub mod record;
pub mod sqlite;
