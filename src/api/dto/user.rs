//! DTOs for user directory endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{LoanHistory, User, UserLoanHistory};

/// Request to register a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(range(min = 0))]
    pub age: Option<i32>,
}

/// Request to rename a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub id: i64,

    #[validate(length(min = 1))]
    pub name: String,
}

/// Query string for `DELETE /api/users`.
#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
        }
    }
}

/// One loan record as shown in a user's history.
#[derive(Debug, Serialize)]
pub struct BookHistoryItem {
    pub name: String,
    pub is_return: bool,
}

impl From<LoanHistory> for BookHistoryItem {
    fn from(loan: LoanHistory) -> Self {
        Self {
            is_return: loan.is_returned(),
            name: loan.book_name,
        }
    }
}

/// A user and every book it has borrowed.
#[derive(Debug, Serialize)]
pub struct UserLoanHistoryResponse {
    pub name: String,
    pub books: Vec<BookHistoryItem>,
}

impl From<UserLoanHistory> for UserLoanHistoryResponse {
    fn from(history: UserLoanHistory) -> Self {
        Self {
            name: history.user.name,
            books: history.loans.into_iter().map(Into::into).collect(),
        }
    }
}
