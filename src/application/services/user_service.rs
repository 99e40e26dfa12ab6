//! User directory service.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{LoanHistory, NewUser, User, UserLoanHistory};
use crate::domain::repositories::{LoanHistoryRepository, UserRepository};
use crate::error::AppError;
use crate::utils::validation::{validate_age, validate_name};
use serde_json::json;

/// Service for managing library members and reporting their loan histories.
pub struct UserService<U, L>
where
    U: UserRepository + ?Sized,
    L: LoanHistoryRepository + ?Sized,
{
    users: Arc<U>,
    loans: Arc<L>,
}

impl<U, L> UserService<U, L>
where
    U: UserRepository + ?Sized,
    L: LoanHistoryRepository + ?Sized,
{
    /// Creates a new user service.
    pub fn new(users: Arc<U>, loans: Arc<L>) -> Self {
        Self { users, loans }
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `name` is blank or `age` is negative.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn register_user(&self, name: String, age: Option<i32>) -> Result<User, AppError> {
        validate_name("name", &name)?;
        validate_age(age)?;

        let user = self.users.create(NewUser { name, age }).await?;
        tracing::info!(user_id = user.id, name = %user.name, "User registered");

        Ok(user)
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// Renames a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `new_name` is blank.
    /// Returns [`AppError::NotFound`] if no user has that id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn rename_user(&self, id: i64, new_name: String) -> Result<User, AppError> {
        validate_name("name", &new_name)?;

        let user = self.users.rename(id, &new_name).await?;
        tracing::info!(user_id = id, name = %user.name, "User renamed");

        Ok(user)
    }

    /// Deletes a user by name together with all of its loan records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has that name.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_user(&self, name: &str) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "name": name })))?;

        let removed = self.users.delete_with_loan_history(user.id).await?;
        tracing::info!(
            user_id = user.id,
            name = %user.name,
            loan_records = removed,
            "User deleted"
        );

        Ok(())
    }

    /// Lists every user with its loan records.
    ///
    /// Users that never borrowed anything are included with an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_users_with_loan_history(&self) -> Result<Vec<UserLoanHistory>, AppError> {
        let users = self.users.list().await?;

        let mut by_user: HashMap<i64, Vec<LoanHistory>> = HashMap::new();
        for loan in self.loans.find_all().await? {
            by_user.entry(loan.user_id).or_default().push(loan);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let loans = by_user.remove(&user.id).unwrap_or_default();
                UserLoanHistory { user, loans }
            })
            .collect())
    }
}
