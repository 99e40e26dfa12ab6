//! Application layer services implementing business logic.
//!
//! Services validate input, coordinate repository calls, and enforce the
//! rules that span more than one repository. They depend only on repository
//! traits, so any storage backend can sit underneath.
//!
//! # Available Services
//!
//! - [`services::book_service::BookService`] - Book registration and catalog statistics
//! - [`services::user_service::UserService`] - User directory and loan history reporting
//! - [`services::loan_service::LoanService`] - Loan/return state machine and loan counts

pub mod services;
