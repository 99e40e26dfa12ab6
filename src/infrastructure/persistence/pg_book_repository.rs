//! PostgreSQL implementation of the book catalog.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Book, BookCategory, CategoryCount, NewBook};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    name: String,
    category: Option<String>,
}

fn parse_category(raw: &str) -> Result<BookCategory, AppError> {
    raw.parse().map_err(|_| {
        AppError::internal("Unknown book category in storage", json!({ "category": raw }))
    })
}

impl TryFrom<BookRow> for Book {
    type Error = AppError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let category = row.category.as_deref().map(parse_category).transpose()?;
        Ok(Book::new(row.id, row.name, category))
    }
}

/// PostgreSQL repository for books.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (name, category)
            VALUES ($1, $2)
            RETURNING id, name, category
            "#,
        )
        .bind(&new_book.name)
        .bind(new_book.category.map(|c| c.as_str()))
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Book>, AppError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, name, category
            FROM books
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Book>, AppError> {
        let rows = sqlx::query_as::<_, BookRow>("SELECT id, name, category FROM books ORDER BY id")
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, AppError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT category, COUNT(*)
            FROM books
            WHERE category IS NOT NULL
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(category, count)| {
                Ok(CategoryCount {
                    category: parse_category(&category)?,
                    count,
                })
            })
            .collect()
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM books")
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
