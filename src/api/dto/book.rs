//! DTOs for book catalog and loan endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Book, BookCategory, CategoryCount, LoanHistory, LoanStatus};

/// Request to register a book.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1))]
    pub name: String,

    /// Optional classification; omitted or `null` leaves the book uncategorized.
    pub category: Option<BookCategory>,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub name: String,
    pub category: Option<BookCategory>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            category: book.category,
        }
    }
}

/// One row of the per-category statistics.
#[derive(Debug, Serialize)]
pub struct CategoryCountItem {
    pub category: BookCategory,
    pub count: i64,
}

impl From<CategoryCount> for CategoryCountItem {
    fn from(c: CategoryCount) -> Self {
        Self {
            category: c.category,
            count: c.count,
        }
    }
}

/// Request body shared by the loan and return endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct LoanRequest {
    #[validate(length(min = 1))]
    pub user_name: String,

    #[validate(length(min = 1))]
    pub book_name: String,
}

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    pub id: i64,
    pub user_id: i64,
    pub book_name: String,
    pub status: LoanStatus,
}

impl From<LoanHistory> for LoanResponse {
    fn from(loan: LoanHistory) -> Self {
        Self {
            id: loan.id,
            user_id: loan.user_id,
            book_name: loan.book_name,
            status: loan.status,
        }
    }
}

/// Number of outstanding loans.
#[derive(Debug, Serialize)]
pub struct LoanCountResponse {
    pub count: i64,
}
