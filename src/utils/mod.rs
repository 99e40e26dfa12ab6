//! Helper functions used across the application.
//!
//! - [`validation`] - Name and age validation for service inputs
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod validation;
