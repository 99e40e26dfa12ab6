//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//! Writes that depend on a precondition run inside an explicit transaction.
//!
//! # Repositories
//!
//! - [`PgBookRepository`] - Book catalog
//! - [`PgUserRepository`] - Users, with the cascading delete
//! - [`PgLoanHistoryRepository`] - Loan ledger with guarded writes

pub mod pg_book_repository;
pub mod pg_loan_history_repository;
pub mod pg_user_repository;

pub use pg_book_repository::PgBookRepository;
pub use pg_loan_history_repository::PgLoanHistoryRepository;
pub use pg_user_repository::PgUserRepository;
