use library_app::domain::entities::{LoanStatus, NewLoan, NewUser};
use library_app::domain::repositories::{LoanHistoryRepository, UserRepository};
use library_app::error::AppError;
use library_app::infrastructure::persistence::{PgLoanHistoryRepository, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

async fn setup(pool: PgPool) -> (PgLoanHistoryRepository, i64) {
    let pool = Arc::new(pool);
    let user = PgUserRepository::new(pool.clone())
        .create(NewUser {
            name: "milhouse".to_string(),
            age: Some(10),
        })
        .await
        .unwrap();
    (PgLoanHistoryRepository::new(pool), user.id)
}

fn loan(user_id: i64, book: &str) -> NewLoan {
    NewLoan {
        user_id,
        book_name: book.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_loan(pool: PgPool) {
    let (repo, user_id) = setup(pool).await;

    let record = repo.create_loan(loan(user_id, "Radioactive Man")).await.unwrap();

    assert_eq!(record.user_id, user_id);
    assert_eq!(record.status, LoanStatus::Loaned);

    let outstanding = repo
        .find_outstanding(user_id, "Radioactive Man")
        .await
        .unwrap();
    assert_eq!(outstanding.map(|l| l.id), Some(record.id));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_outstanding_loan_conflicts(pool: PgPool) {
    let (repo, user_id) = setup(pool).await;
    repo.create_loan(loan(user_id, "Dune")).await.unwrap();

    let err = repo.create_loan(loan(user_id, "Dune")).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(repo.count_by_status(LoanStatus::Loaned).await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_loan_for_missing_user(pool: PgPool) {
    let (repo, user_id) = setup(pool).await;

    let err = repo.create_loan(loan(user_id + 1000, "Dune")).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_concurrent_create_loan_admits_one(pool: PgPool) {
    let (repo, user_id) = setup(pool).await;
    let repo = Arc::new(repo);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create_loan(loan(user_id, "Dune")).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repo.count_by_status(LoanStatus::Loaned).await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_status_is_compare_and_set(pool: PgPool) {
    let (repo, user_id) = setup(pool).await;
    let record = repo.create_loan(loan(user_id, "Dune")).await.unwrap();

    let returned = repo
        .update_status(record.id, LoanStatus::Loaned, LoanStatus::Returned)
        .await
        .unwrap();
    assert_eq!(returned.status, LoanStatus::Returned);

    let again = repo
        .update_status(record.id, LoanStatus::Loaned, LoanStatus::Returned)
        .await;
    assert!(matches!(again, Err(AppError::NotFound { .. })));

    let backwards = repo
        .update_status(record.id, LoanStatus::Returned, LoanStatus::Loaned)
        .await;
    assert!(matches!(backwards, Err(AppError::Validation { .. })));

    assert!(repo.find_outstanding(user_id, "Dune").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_count_and_list(pool: PgPool) {
    let (repo, user_id) = setup(pool).await;
    let a = repo.create_loan(loan(user_id, "A")).await.unwrap();
    repo.create_loan(loan(user_id, "B")).await.unwrap();
    repo.update_status(a.id, LoanStatus::Loaned, LoanStatus::Returned)
        .await
        .unwrap();

    assert_eq!(repo.count_by_status(LoanStatus::Loaned).await.unwrap(), 1);
    assert_eq!(repo.count_by_status(LoanStatus::Returned).await.unwrap(), 1);
    assert_eq!(repo.find_all().await.unwrap().len(), 2);
    assert_eq!(repo.find_by_user(user_id).await.unwrap().len(), 2);

    assert_eq!(repo.delete_by_user(user_id).await.unwrap(), 2);
    assert!(repo.find_all().await.unwrap().is_empty());
}
