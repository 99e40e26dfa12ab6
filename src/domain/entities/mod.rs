//! Core domain entities representing the library data model.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! `New*` structs so that identifiers are only ever assigned by storage.
//!
//! # Entity Types
//!
//! - [`Book`] - A catalog entry with an optional [`BookCategory`]
//! - [`User`] - A library member
//! - [`LoanHistory`] - A loan event linking a user to a book name

pub mod book;
pub mod loan_history;
pub mod user;

pub use book::{Book, BookCategory, CategoryCount, NewBook, UnknownCategory};
pub use loan_history::{LoanHistory, LoanStatus, NewLoan, UnknownStatus};
pub use user::{NewUser, User, UserLoanHistory};
