#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use library_app::api::handlers::health_handler;
use library_app::api::routes::api_routes;
use library_app::application::services::LoanPolicy;
use library_app::domain::entities::{BookCategory, User};
use library_app::infrastructure::memory::MemoryStore;
use library_app::state::{AppState, Repositories};
use std::sync::Arc;

/// State over a fresh in-memory store with the default loan policy.
pub fn create_test_state() -> AppState {
    AppState::new(Repositories::memory(), LoanPolicy::default())
}

/// State over a fresh in-memory store with the given loan policy.
pub fn create_state_with_policy(policy: LoanPolicy) -> AppState {
    AppState::new(Repositories::memory(), policy)
}

/// State plus a handle on the store it runs over.
pub fn create_state_with_store() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        Repositories::from_store(store.clone()),
        LoanPolicy::default(),
    );
    (state, store)
}

/// Health check plus every `/api` route over `state`.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state);
    TestServer::new(app).unwrap()
}

pub async fn create_test_user(state: &AppState, name: &str) -> User {
    state
        .user_service
        .register_user(name.to_string(), Some(30))
        .await
        .unwrap()
}

pub async fn create_test_book(state: &AppState, name: &str, category: Option<BookCategory>) {
    state
        .book_service
        .register_book(name.to_string(), category)
        .await
        .unwrap();
}
