//! Repository trait for the book catalog.

use crate::domain::entities::{Book, CategoryCount, NewBook};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the book catalog.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Persists a new book. Duplicate names are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError>;

    /// Finds a book by exact name. When several books share the name, the
    /// one with the lowest id is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Book>, AppError>;

    /// Lists all books ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<Book>, AppError>;

    /// Counts books per category.
    ///
    /// Only categories carried by at least one book appear in the result.
    /// Books without a category are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, AppError>;

    /// Removes every book and returns how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_all(&self) -> Result<u64, AppError>;
}
