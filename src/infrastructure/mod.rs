//! Infrastructure layer for storage.
//!
//! Implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - In-process store, one mutex over all tables
//! - [`persistence`] - PostgreSQL repository implementations

pub mod memory;
pub mod persistence;
