//! API route configuration.

use crate::api::handlers::{
    book_stats_handler, create_book_handler, create_user_handler, delete_user_handler,
    loan_book_handler, loan_count_handler, return_book_handler, update_user_handler,
    user_list_handler, user_loan_history_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST   /books`        - Register a book
/// - `GET    /books/stats`  - Book counts per category
/// - `POST   /books/loan`   - Loan a book to a user
/// - `GET    /books/loan`   - Number of outstanding loans
/// - `PUT    /books/return` - Return a loaned book
/// - `POST   /users`        - Register a user
/// - `GET    /users`        - List users
/// - `PUT    /users`        - Rename a user
/// - `DELETE /users?name=`  - Delete a user and its loan history
/// - `GET    /users/loan`   - Users with their loan histories
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/books", post(create_book_handler))
        .route("/books/stats", get(book_stats_handler))
        .route(
            "/books/loan",
            post(loan_book_handler).get(loan_count_handler),
        )
        .route("/books/return", put(return_book_handler))
        .route(
            "/users",
            post(create_user_handler)
                .get(user_list_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/users/loan", get(user_loan_history_handler))
}
