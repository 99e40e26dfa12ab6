//! Book catalog service.

use std::sync::Arc;

use crate::domain::entities::{Book, BookCategory, CategoryCount, NewBook};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;
use crate::utils::validation::validate_name;

/// Service for registering books and summarizing the catalog.
pub struct BookService<R: BookRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: BookRepository + ?Sized> BookService<R> {
    /// Creates a new book service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a book.
    ///
    /// Duplicate names are accepted; each call creates a new book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `name` is blank. Nothing is persisted.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn register_book(
        &self,
        name: String,
        category: Option<BookCategory>,
    ) -> Result<Book, AppError> {
        validate_name("name", &name)?;

        let book = self.repository.create(NewBook { name, category }).await?;
        tracing::info!(book_id = book.id, name = %book.name, category = ?book.category, "Book registered");

        Ok(book)
    }

    /// Finds a book by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Book>, AppError> {
        self.repository.find_by_name(name).await
    }

    /// Lists every registered book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_books(&self) -> Result<Vec<Book>, AppError> {
        self.repository.list().await
    }

    /// Counts books per category, ordered by category.
    ///
    /// Categories without books are omitted rather than reported as zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_by_category(&self) -> Result<Vec<CategoryCount>, AppError> {
        let mut counts: Vec<CategoryCount> = self
            .repository
            .count_by_category()
            .await?
            .into_iter()
            .filter(|c| c.count > 0)
            .collect();
        counts.sort_by_key(|c| c.category);

        Ok(counts)
    }
}
