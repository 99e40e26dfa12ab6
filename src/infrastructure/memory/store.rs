use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::entities::{
    Book, CategoryCount, LoanHistory, LoanStatus, NewBook, NewLoan, NewUser, User,
};
use crate::domain::repositories::{BookRepository, LoanHistoryRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

#[derive(Default)]
struct Tables {
    books: BTreeMap<i64, Book>,
    users: BTreeMap<i64, User>,
    loans: BTreeMap<i64, LoanHistory>,
    next_book_id: i64,
    next_user_id: i64,
    next_loan_id: i64,
}

impl Tables {
    fn allocate(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn outstanding(&self, user_id: i64, book_name: &str) -> Option<&LoanHistory> {
        self.loans
            .values()
            .find(|l| l.user_id == user_id && l.book_name == book_name && l.is_outstanding())
    }
}

/// Embedded store holding books, users and loan records in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory storage");
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let mut tables = self.tables.lock().await;
        let id = Tables::allocate(&mut tables.next_book_id);
        let book = Book::new(id, new_book.name, new_book.category);
        tables.books.insert(id, book.clone());
        Ok(book)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Book>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.books.values().find(|b| b.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Book>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.books.values().cloned().collect())
    }

    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, AppError> {
        let tables = self.tables.lock().await;

        let mut counts: BTreeMap<_, i64> = BTreeMap::new();
        for category in tables.books.values().filter_map(|b| b.category) {
            *counts.entry(category).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().await;
        let removed = tables.books.len() as u64;
        tables.books.clear();
        Ok(removed)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().await;
        let id = Tables::allocate(&mut tables.next_user_id);
        let user = User::new(id, new_user.name, new_user.age);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn rename(&self, id: i64, name: &str) -> Result<User, AppError> {
        let mut tables = self.tables.lock().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;
        user.name = name.to_string();
        Ok(user.clone())
    }

    async fn delete_with_loan_history(&self, id: i64) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().await;

        if !tables.users.contains_key(&id) {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }

        let before = tables.loans.len();
        tables.loans.retain(|_, l| l.user_id != id);
        let removed = (before - tables.loans.len()) as u64;
        tables.users.remove(&id);

        Ok(removed)
    }
}

#[async_trait]
impl LoanHistoryRepository for MemoryStore {
    async fn find_outstanding(
        &self,
        user_id: i64,
        book_name: &str,
    ) -> Result<Option<LoanHistory>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.outstanding(user_id, book_name).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<LoanHistory>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .loans
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<LoanHistory>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.loans.values().cloned().collect())
    }

    async fn create_loan(&self, new_loan: NewLoan) -> Result<LoanHistory, AppError> {
        let mut tables = self.tables.lock().await;

        if !tables.users.contains_key(&new_loan.user_id) {
            return Err(AppError::not_found(
                "User not found",
                json!({ "user_id": new_loan.user_id }),
            ));
        }

        if tables
            .outstanding(new_loan.user_id, &new_loan.book_name)
            .is_some()
        {
            return Err(AppError::conflict(
                "Book is already loaned to this user",
                json!({ "user_id": new_loan.user_id, "book_name": new_loan.book_name }),
            ));
        }

        let id = Tables::allocate(&mut tables.next_loan_id);
        let loan = LoanHistory::new(id, new_loan.user_id, new_loan.book_name, LoanStatus::Loaned);
        tables.loans.insert(id, loan.clone());

        Ok(loan)
    }

    async fn update_status(
        &self,
        id: i64,
        from: LoanStatus,
        to: LoanStatus,
    ) -> Result<LoanHistory, AppError> {
        if !from.can_transition_to(to) {
            return Err(AppError::bad_request(
                "Illegal loan status transition",
                json!({ "from": from.as_str(), "to": to.as_str() }),
            ));
        }

        let mut tables = self.tables.lock().await;
        let loan = tables
            .loans
            .get_mut(&id)
            .filter(|l| l.status == from)
            .ok_or_else(|| {
                AppError::not_found(
                    "Loan record not found in expected status",
                    json!({ "id": id, "expected": from.as_str() }),
                )
            })?;
        loan.status = to;

        Ok(loan.clone())
    }

    async fn count_by_status(&self, status: LoanStatus) -> Result<i64, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.loans.values().filter(|l| l.status == status).count() as i64)
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().await;
        let before = tables.loans.len();
        tables.loans.retain(|_, l| l.user_id != user_id);
        Ok((before - tables.loans.len()) as u64)
    }
}
