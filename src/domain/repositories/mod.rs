//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure`. Mock implementations are generated via `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`BookRepository`] - Book catalog
//! - [`UserRepository`] - User directory, including the cascading user delete
//! - [`LoanHistoryRepository`] - Loan ledger with guarded writes

pub mod book_repository;
pub mod loan_history_repository;
pub mod user_repository;

pub use book_repository::BookRepository;
pub use loan_history_repository::LoanHistoryRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use book_repository::MockBookRepository;
#[cfg(test)]
pub use loan_history_repository::MockLoanHistoryRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
