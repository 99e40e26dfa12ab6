//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{BookService, LoanPolicy, LoanService, UserService};
use crate::config::StorageBackend;
use crate::domain::repositories::{BookRepository, LoanHistoryRepository, UserRepository};
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::persistence::{
    PgBookRepository, PgLoanHistoryRepository, PgUserRepository,
};

pub type DynBookService = BookService<dyn BookRepository>;
pub type DynUserService = UserService<dyn UserRepository, dyn LoanHistoryRepository>;
pub type DynLoanService =
    LoanService<dyn UserRepository, dyn BookRepository, dyn LoanHistoryRepository>;

/// The three repositories, all bound to the same backend.
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<dyn BookRepository>,
    pub users: Arc<dyn UserRepository>,
    pub loans: Arc<dyn LoanHistoryRepository>,
    pub backend: StorageBackend,
}

impl Repositories {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            books: Arc::new(PgBookRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            loans: Arc::new(PgLoanHistoryRepository::new(pool)),
            backend: StorageBackend::Postgres,
        }
    }

    /// In-process repositories sharing one [`MemoryStore`].
    pub fn memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    /// Repositories over an existing store, so callers can inspect it afterwards.
    pub fn from_store(store: Arc<MemoryStore>) -> Self {
        Self {
            books: store.clone(),
            users: store.clone(),
            loans: store,
            backend: StorageBackend::Memory,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<DynBookService>,
    pub user_service: Arc<DynUserService>,
    pub loan_service: Arc<DynLoanService>,
    pub storage_backend: StorageBackend,
}

impl AppState {
    /// Wires the services over the given repositories.
    pub fn new(repositories: Repositories, policy: LoanPolicy) -> Self {
        let Repositories {
            books,
            users,
            loans,
            backend,
        } = repositories;

        let book_service = Arc::new(BookService::new(books));
        let user_service = Arc::new(UserService::new(users.clone(), loans.clone()));
        let loan_service = Arc::new(LoanService::new(
            users,
            book_service.clone(),
            loans,
            policy,
        ));

        Self {
            book_service,
            user_service,
            loan_service,
            storage_backend: backend,
        }
    }
}
