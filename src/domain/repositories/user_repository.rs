//! Repository trait for the user directory.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for library members.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by exact name. When several users share the name, the
    /// one with the lowest id is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError>;

    /// Lists all users ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Changes a user's name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn rename(&self, id: i64, name: &str) -> Result<User, AppError>;

    /// Deletes a user and every loan record it owns in one transaction.
    ///
    /// Loan records are removed first, then the user row.
    ///
    /// # Returns
    ///
    /// The number of loan records removed alongside the user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist; nothing is removed.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_with_loan_history(&self, id: i64) -> Result<u64, AppError>;
}
