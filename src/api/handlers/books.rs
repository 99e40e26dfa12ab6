//! Handlers for book catalog and loan endpoints.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::book::{
    BookResponse, CategoryCountItem, CreateBookRequest, LoanCountResponse, LoanRequest,
    LoanResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a book.
///
/// # Endpoint
///
/// `POST /api/books`
///
/// # Errors
///
/// Returns 400 if the name is blank.
/// Returns 422 if the body does not deserialize, including an unknown category.
pub async fn create_book_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    payload.validate()?;

    let book = state
        .book_service
        .register_book(payload.name, payload.category)
        .await?;

    Ok((StatusCode::CREATED, Json(book.into())))
}

/// Returns the number of books per category.
///
/// # Endpoint
///
/// `GET /api/books/stats`
///
/// Categories without books are omitted.
pub async fn book_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryCountItem>>, AppError> {
    let stats = state.loan_service.book_statistics().await?;

    Ok(Json(stats.into_iter().map(Into::into).collect()))
}

/// Loans a book to a user.
///
/// # Endpoint
///
/// `POST /api/books/loan`
///
/// # Errors
///
/// Returns 400 if a name is blank.
/// Returns 404 if the user (or, when required, the book) does not exist.
/// Returns 409 if the user already has this book on loan.
pub async fn loan_book_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoanRequest>,
) -> Result<(StatusCode, Json<LoanResponse>), AppError> {
    payload.validate()?;

    let loan = state
        .loan_service
        .loan_book(&payload.user_name, &payload.book_name)
        .await?;

    Ok((StatusCode::CREATED, Json(loan.into())))
}

/// Returns a loaned book.
///
/// # Endpoint
///
/// `PUT /api/books/return`
///
/// # Errors
///
/// Returns 400 if a name is blank.
/// Returns 404 if the user does not exist or has no outstanding loan for the book.
pub async fn return_book_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoanRequest>,
) -> Result<Json<LoanResponse>, AppError> {
    payload.validate()?;

    let loan = state
        .loan_service
        .return_book(&payload.user_name, &payload.book_name)
        .await?;

    Ok(Json(loan.into()))
}

/// Returns the number of outstanding loans.
///
/// # Endpoint
///
/// `GET /api/books/loan`
pub async fn loan_count_handler(
    State(state): State<AppState>,
) -> Result<Json<LoanCountResponse>, AppError> {
    let count = state.loan_service.count_loaned_books().await?;

    Ok(Json(LoanCountResponse { count }))
}
