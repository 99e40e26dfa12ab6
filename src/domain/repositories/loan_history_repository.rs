//! Repository trait for the loan ledger.

use crate::domain::entities::{LoanHistory, LoanStatus, NewLoan};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for loan history records.
///
/// Write operations that depend on a precondition (no outstanding loan, record
/// still `LOANED`) check and write atomically; callers never see a state where
/// two outstanding records exist for the same user and book name.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLoanHistoryRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanHistoryRepository: Send + Sync {
    /// Finds the outstanding (`LOANED`) record for a user and book name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_outstanding(
        &self,
        user_id: i64,
        book_name: &str,
    ) -> Result<Option<LoanHistory>, AppError>;

    /// Lists every record owned by a user, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<LoanHistory>, AppError>;

    /// Lists every record, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_all(&self) -> Result<Vec<LoanHistory>, AppError>;

    /// Opens a loan.
    ///
    /// The outstanding-loan check and the insert form one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already holds an outstanding
    /// record for the same book name.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create_loan(&self, new_loan: NewLoan) -> Result<LoanHistory, AppError>;

    /// Moves a record from `from` to `to`, only if it is currently in `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record with that id is in `from`.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update_status(
        &self,
        id: i64,
        from: LoanStatus,
        to: LoanStatus,
    ) -> Result<LoanHistory, AppError>;

    /// Counts records in the given status across all users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_by_status(&self, status: LoanStatus) -> Result<i64, AppError>;

    /// Removes every record owned by a user and returns how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_by_user(&self, user_id: i64) -> Result<u64, AppError>;
}
