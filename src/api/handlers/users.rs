//! Handlers for user directory endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::user::{
    CreateUserRequest, DeleteUserQuery, UpdateUserRequest, UserLoanHistoryResponse, UserResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Errors
///
/// Returns 400 if the name is blank or the age is negative.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register_user(payload.name, payload.age)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Lists all users.
///
/// # Endpoint
///
/// `GET /api/users`
pub async fn user_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Renames a user.
///
/// # Endpoint
///
/// `PUT /api/users`
///
/// # Errors
///
/// Returns 400 if the new name is blank.
/// Returns 404 if no user has the given id.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .rename_user(payload.id, payload.name)
        .await?;

    Ok(Json(user.into()))
}

/// Deletes a user and its loan history.
///
/// # Endpoint
///
/// `DELETE /api/users?name={name}`
///
/// # Errors
///
/// Returns 404 if no user has the given name.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Query(query): Query<DeleteUserQuery>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(&query.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists every user with the books it has borrowed.
///
/// # Endpoint
///
/// `GET /api/users/loan`
///
/// Users without loans appear with an empty `books` list.
pub async fn user_loan_history_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserLoanHistoryResponse>>, AppError> {
    let histories = state.user_service.list_users_with_loan_history().await?;

    Ok(Json(histories.into_iter().map(Into::into).collect()))
}
