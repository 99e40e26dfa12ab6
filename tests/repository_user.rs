use library_app::domain::entities::{NewLoan, NewUser};
use library_app::domain::repositories::{LoanHistoryRepository, UserRepository};
use library_app::error::AppError;
use library_app::infrastructure::persistence::{PgLoanHistoryRepository, PgUserRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn new_user(name: &str, age: Option<i32>) -> NewUser {
    NewUser {
        name: name.to_string(),
        age,
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("ned", Some(45))).await.unwrap();

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id, user);

    let by_name = repo.find_by_name("ned").await.unwrap().unwrap();
    assert_eq!(by_name.id, user.id);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_negative_age_rejected_by_schema(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo.create(new_user("ned", Some(-1))).await;

    assert!(result.is_err());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_rename_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = repo.create(new_user("ned", None)).await.unwrap();

    let renamed = repo.rename(user.id, "edward").await.unwrap();
    assert_eq!(renamed.name, "edward");

    let missing = repo.rename(user.id + 1000, "nobody").await;
    assert!(matches!(missing, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_delete_with_loan_history(pool: PgPool) {
    let pool = Arc::new(pool);
    let users = PgUserRepository::new(pool.clone());
    let loans = PgLoanHistoryRepository::new(pool);

    let ned = users.create(new_user("ned", None)).await.unwrap();
    let rod = users.create(new_user("rod", None)).await.unwrap();
    for (user_id, book) in [(ned.id, "Bible"), (ned.id, "Hymns"), (rod.id, "Bible")] {
        loans
            .create_loan(NewLoan {
                user_id,
                book_name: book.to_string(),
            })
            .await
            .unwrap();
    }

    let removed = users.delete_with_loan_history(ned.id).await.unwrap();

    assert_eq!(removed, 2);
    assert!(users.find_by_id(ned.id).await.unwrap().is_none());
    assert!(loans.find_by_user(ned.id).await.unwrap().is_empty());
    assert_eq!(loans.find_by_user(rod.id).await.unwrap().len(), 1);

    let again = users.delete_with_loan_history(ned.id).await;
    assert!(matches!(again, Err(AppError::NotFound { .. })));
}
