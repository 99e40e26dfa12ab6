mod common;

use library_app::domain::repositories::LoanHistoryRepository;
use library_app::error::AppError;

#[tokio::test]
async fn test_register_user_validation() {
    let state = common::create_test_state();

    let err = state
        .user_service
        .register_user("".to_string(), Some(20))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = state
        .user_service
        .register_user("alice".to_string(), Some(-1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    assert!(state.user_service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_user_without_age() {
    let state = common::create_test_state();

    let user = state
        .user_service
        .register_user("alice".to_string(), None)
        .await
        .unwrap();

    assert_eq!(user.name, "alice");
    assert_eq!(user.age, None);
}

#[tokio::test]
async fn test_rename_user() {
    let state = common::create_test_state();
    let user = common::create_test_user(&state, "alice").await;

    let renamed = state
        .user_service
        .rename_user(user.id, "alicia".to_string())
        .await
        .unwrap();

    assert_eq!(renamed.id, user.id);
    assert_eq!(renamed.name, "alicia");
    assert_eq!(renamed.age, user.age);
}

#[tokio::test]
async fn test_rename_unknown_or_blank_fails() {
    let state = common::create_test_state();
    let user = common::create_test_user(&state, "alice").await;

    let err = state
        .user_service
        .rename_user(user.id + 100, "bob".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = state
        .user_service
        .rename_user(user.id, " ".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_delete_user_removes_loan_history() {
    let (state, store) = common::create_state_with_store();
    let alice = common::create_test_user(&state, "alice").await;
    let bob = common::create_test_user(&state, "bob").await;
    common::create_test_book(&state, "Dune", None).await;
    common::create_test_book(&state, "Emma", None).await;

    state.loan_service.loan_book("alice", "Dune").await.unwrap();
    state.loan_service.loan_book("alice", "Emma").await.unwrap();
    state.loan_service.return_book("alice", "Emma").await.unwrap();
    state.loan_service.loan_book("bob", "Dune").await.unwrap();

    state.user_service.delete_user("alice").await.unwrap();

    assert!(store.find_by_user(alice.id).await.unwrap().is_empty());
    assert_eq!(store.find_by_user(bob.id).await.unwrap().len(), 1);
    assert_eq!(state.loan_service.count_loaned_books().await.unwrap(), 1);

    let users = state.user_service.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "bob");
}

#[tokio::test]
async fn test_delete_unknown_user_is_not_found() {
    let state = common::create_test_state();

    let err = state.user_service.delete_user("ghost").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_loan_history_includes_users_without_loans() {
    let state = common::create_test_state();
    common::create_test_user(&state, "alice").await;
    common::create_test_user(&state, "bob").await;
    common::create_test_book(&state, "Dune", None).await;
    common::create_test_book(&state, "Emma", None).await;

    state.loan_service.loan_book("alice", "Dune").await.unwrap();
    state.loan_service.loan_book("alice", "Emma").await.unwrap();
    state.loan_service.return_book("alice", "Dune").await.unwrap();

    let histories = state
        .user_service
        .list_users_with_loan_history()
        .await
        .unwrap();

    assert_eq!(histories.len(), 2);

    let alice = histories.iter().find(|h| h.user.name == "alice").unwrap();
    assert_eq!(alice.loans.len(), 2);
    let dune = alice.loans.iter().find(|l| l.book_name == "Dune").unwrap();
    assert!(dune.is_returned());
    let emma = alice.loans.iter().find(|l| l.book_name == "Emma").unwrap();
    assert!(emma.is_outstanding());

    let bob = histories.iter().find(|h| h.user.name == "bob").unwrap();
    assert!(bob.loans.is_empty());
}

#[tokio::test]
async fn test_long_names_are_accepted() {
    let state = common::create_test_state();
    let long_name = "b".repeat(300);

    let user = state
        .user_service
        .register_user(long_name.clone(), Some(1))
        .await
        .unwrap();
    assert_eq!(user.name, long_name);

    let renamed = state
        .user_service
        .rename_user(user.id, "c".repeat(1_000))
        .await
        .unwrap();
    assert_eq!(renamed.name.chars().count(), 1_000);

    let book = state
        .book_service
        .register_book("a".repeat(300), None)
        .await
        .unwrap();
    assert_eq!(book.name.len(), 300);
}
