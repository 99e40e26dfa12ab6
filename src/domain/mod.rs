//! Domain layer containing library entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on infrastructure or presentation code.
//! Business rules that span repositories live in
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
