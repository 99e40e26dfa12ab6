//! PostgreSQL implementation of the loan ledger.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use std::sync::Arc;

use crate::domain::entities::{LoanHistory, LoanStatus, NewLoan};
use crate::domain::repositories::LoanHistoryRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;
use serde_json::json;

/// Partial unique index allowing one `LOANED` row per (user, book name).
const OUTSTANDING_LOAN_INDEX: &str = "user_loan_history_outstanding_key";

#[derive(sqlx::FromRow)]
struct LoanRow {
    id: i64,
    user_id: i64,
    book_name: String,
    status: String,
}

impl TryFrom<LoanRow> for LoanHistory {
    type Error = AppError;

    fn try_from(row: LoanRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<LoanStatus>().map_err(|_| {
            AppError::internal(
                "Unknown loan status in storage",
                json!({ "id": row.id, "status": row.status }),
            )
        })?;

        Ok(LoanHistory::new(row.id, row.user_id, row.book_name, status))
    }
}

fn duplicate_loan(user_id: i64, book_name: &str) -> AppError {
    AppError::conflict(
        "Book is already loaned to this user",
        json!({ "user_id": user_id, "book_name": book_name }),
    )
}

/// Deletes every loan record owned by `user_id` using the given executor.
///
/// Shared with [`super::PgUserRepository`] so the cascading user delete can run
/// inside its own transaction.
pub(crate) async fn delete_loans_of_user<'e, E>(executor: E, user_id: i64) -> Result<u64, AppError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM user_loan_history WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// PostgreSQL repository for loan history records.
///
/// `create_loan` serializes on the owning user row (`SELECT ... FOR UPDATE`),
/// and the partial unique index [`OUTSTANDING_LOAN_INDEX`] rejects any
/// duplicate outstanding row that slips past the check.
pub struct PgLoanHistoryRepository {
    pool: Arc<PgPool>,
}

impl PgLoanHistoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanHistoryRepository for PgLoanHistoryRepository {
    async fn find_outstanding(
        &self,
        user_id: i64,
        book_name: &str,
    ) -> Result<Option<LoanHistory>, AppError> {
        let row = sqlx::query_as::<_, LoanRow>(
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_history
            WHERE user_id = $1 AND book_name = $2 AND status = 'LOANED'
            "#,
        )
        .bind(user_id)
        .bind(book_name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(LoanHistory::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<LoanHistory>, AppError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_history
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(LoanHistory::try_from).collect()
    }

    async fn find_all(&self) -> Result<Vec<LoanHistory>, AppError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            "SELECT id, user_id, book_name, status FROM user_loan_history ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(LoanHistory::try_from).collect()
    }

    async fn create_loan(&self, new_loan: NewLoan) -> Result<LoanHistory, AppError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(new_loan.user_id)
            .fetch_optional(&mut *tx)
            .await?;

        if user.is_none() {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "User not found",
                json!({ "user_id": new_loan.user_id }),
            ));
        }

        let outstanding = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM user_loan_history
            WHERE user_id = $1 AND book_name = $2 AND status = 'LOANED'
            "#,
        )
        .bind(new_loan.user_id)
        .bind(&new_loan.book_name)
        .fetch_optional(&mut *tx)
        .await?;

        if outstanding.is_some() {
            tx.rollback().await?;
            return Err(duplicate_loan(new_loan.user_id, &new_loan.book_name));
        }

        let row = sqlx::query_as::<_, LoanRow>(
            r#"
            INSERT INTO user_loan_history (user_id, book_name, status)
            VALUES ($1, $2, 'LOANED')
            RETURNING id, user_id, book_name, status
            "#,
        )
        .bind(new_loan.user_id)
        .bind(&new_loan.book_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, OUTSTANDING_LOAN_INDEX) {
                duplicate_loan(new_loan.user_id, &new_loan.book_name)
            } else {
                AppError::from(e)
            }
        })?;

        tx.commit().await?;

        row.try_into()
    }

    async fn update_status(
        &self,
        id: i64,
        from: LoanStatus,
        to: LoanStatus,
    ) -> Result<LoanHistory, AppError> {
        if !from.can_transition_to(to) {
            return Err(AppError::bad_request(
                "Illegal loan status transition",
                json!({ "from": from.as_str(), "to": to.as_str() }),
            ));
        }

        let row = sqlx::query_as::<_, LoanRow>(
            r#"
            UPDATE user_loan_history
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING id, user_id, book_name, status
            "#,
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(LoanHistory::try_from).transpose()?.ok_or_else(|| {
            AppError::not_found(
                "Loan record not found in expected status",
                json!({ "id": id, "expected": from.as_str() }),
            )
        })
    }

    async fn count_by_status(&self, status: LoanStatus) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_loan_history WHERE status = $1",
        )
        .bind(status.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64, AppError> {
        delete_loans_of_user(self.pool.as_ref(), user_id).await
    }
}
