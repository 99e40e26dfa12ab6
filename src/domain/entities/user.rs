//! User entity.

use super::loan_history::LoanHistory;

/// A library member.
///
/// A user owns its loan history records; removing a user removes them too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
}

impl User {
    pub fn new(id: i64, name: String, age: Option<i32>) -> Self {
        Self { id, name, age }
    }
}

/// Input data for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: Option<i32>,
}

/// A user together with every loan record it owns.
///
/// `loans` is empty, not absent, for users that never borrowed anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLoanHistory {
    pub user: User,
    pub loans: Vec<LoanHistory>,
}
