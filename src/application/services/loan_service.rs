//! Loan and return orchestration.
//!
//! Every loan record follows `LOANED -> RETURNED`, and `RETURNED` is terminal.
//! The duplicate-loan guard and the return transition are enforced by the
//! ledger's guarded writes, so concurrent callers cannot both succeed.

use std::sync::Arc;

use crate::application::services::BookService;
use crate::domain::entities::{CategoryCount, LoanHistory, LoanStatus, NewLoan, User};
use crate::domain::repositories::{BookRepository, LoanHistoryRepository, UserRepository};
use crate::error::AppError;
use crate::utils::validation::validate_name;
use serde_json::json;

/// Tunable rules applied when a loan is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    /// When true, a loan is refused unless a book with that exact name is in the catalog.
    pub require_registered_book: bool,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            require_registered_book: true,
        }
    }
}

/// Service for loaning and returning books, plus loan statistics.
pub struct LoanService<U, B, L>
where
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    L: LoanHistoryRepository + ?Sized,
{
    users: Arc<U>,
    catalog: Arc<BookService<B>>,
    loans: Arc<L>,
    policy: LoanPolicy,
}

impl<U, B, L> LoanService<U, B, L>
where
    U: UserRepository + ?Sized,
    B: BookRepository + ?Sized,
    L: LoanHistoryRepository + ?Sized,
{
    /// Creates a new loan service.
    pub fn new(
        users: Arc<U>,
        catalog: Arc<BookService<B>>,
        loans: Arc<L>,
        policy: LoanPolicy,
    ) -> Self {
        Self {
            users,
            catalog,
            loans,
            policy,
        }
    }

    /// Loans a book to a user.
    ///
    /// # Flow
    ///
    /// 1. Resolve the user by name
    /// 2. If [`LoanPolicy::require_registered_book`] is set, check the catalog
    /// 3. Open the loan; the ledger rejects it if one is already outstanding
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either name is blank.
    /// Returns [`AppError::NotFound`] if the user (or, under the policy, the book) is unknown.
    /// Returns [`AppError::Conflict`] if the user already has this book on loan.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn loan_book(&self, user_name: &str, book_name: &str) -> Result<LoanHistory, AppError> {
        validate_name("user_name", user_name)?;
        validate_name("book_name", book_name)?;

        let user = self.resolve_user(user_name).await?;

        if self.policy.require_registered_book
            && self.catalog.find_by_name(book_name).await?.is_none()
        {
            return Err(AppError::not_found(
                "Book not found",
                json!({ "book_name": book_name }),
            ));
        }

        let new_loan = NewLoan {
            user_id: user.id,
            book_name: book_name.to_string(),
        };

        match self.loans.create_loan(new_loan).await {
            Ok(loan) => {
                tracing::info!(
                    loan_id = loan.id,
                    user_id = user.id,
                    book_name = %loan.book_name,
                    "Book loaned"
                );
                Ok(loan)
            }
            Err(e @ AppError::Conflict { .. }) => {
                tracing::warn!(user_id = user.id, book_name, "Duplicate loan rejected");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns a loaned book.
    ///
    /// The user's outstanding record for `book_name` moves to `RETURNED`; the
    /// record itself is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either name is blank.
    /// Returns [`AppError::NotFound`] if the user is unknown or holds no
    /// outstanding loan for this book (never loaned, or already returned).
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn return_book(
        &self,
        user_name: &str,
        book_name: &str,
    ) -> Result<LoanHistory, AppError> {
        validate_name("user_name", user_name)?;
        validate_name("book_name", book_name)?;

        let user = self.resolve_user(user_name).await?;

        let loan = self
            .loans
            .find_outstanding(user.id, book_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "No outstanding loan for this book",
                    json!({ "user_name": user_name, "book_name": book_name }),
                )
            })?;

        let returned = self
            .loans
            .update_status(loan.id, LoanStatus::Loaned, LoanStatus::Returned)
            .await?;
        tracing::info!(
            loan_id = returned.id,
            user_id = user.id,
            book_name = %returned.book_name,
            "Book returned"
        );

        Ok(returned)
    }

    /// Counts outstanding loans across all users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_loaned_books(&self) -> Result<i64, AppError> {
        self.loans.count_by_status(LoanStatus::Loaned).await
    }

    /// Counts catalog books per category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn book_statistics(&self) -> Result<Vec<CategoryCount>, AppError> {
        self.catalog.count_by_category().await
    }

    async fn resolve_user(&self, user_name: &str) -> Result<User, AppError> {
        self.users.find_by_name(user_name).await?.ok_or_else(|| {
            AppError::not_found("User not found", json!({ "user_name": user_name }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Book, BookCategory};
    use crate::domain::repositories::{
        MockBookRepository, MockLoanHistoryRepository, MockUserRepository,
    };

    type TestService = LoanService<MockUserRepository, MockBookRepository, MockLoanHistoryRepository>;

    fn service(
        users: MockUserRepository,
        books: MockBookRepository,
        loans: MockLoanHistoryRepository,
        policy: LoanPolicy,
    ) -> TestService {
        LoanService::new(
            Arc::new(users),
            Arc::new(BookService::new(Arc::new(books))),
            Arc::new(loans),
            policy,
        )
    }

    fn users_with_bart() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_name()
            .withf(|name| name == "바트")
            .returning(|_| Ok(Some(User::new(1, "바트".to_string(), Some(20)))));
        users
    }

    fn books_with(name: &'static str) -> MockBookRepository {
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_name()
            .returning(move |n| {
                Ok((n == name).then(|| Book::new(1, name.to_string(), Some(BookCategory::Computer))))
            });
        books
    }

    #[tokio::test]
    async fn test_loan_book_success() {
        let mut loans = MockLoanHistoryRepository::new();
        loans
            .expect_create_loan()
            .withf(|l| l.user_id == 1 && l.book_name == "Head First Java")
            .times(1)
            .returning(|l| Ok(LoanHistory::new(10, l.user_id, l.book_name, LoanStatus::Loaned)));

        let service = service(
            users_with_bart(),
            books_with("Head First Java"),
            loans,
            LoanPolicy::default(),
        );

        let loan = service.loan_book("바트", "Head First Java").await.unwrap();

        assert_eq!(loan.user_id, 1);
        assert_eq!(loan.book_name, "Head First Java");
        assert_eq!(loan.status, LoanStatus::Loaned);
    }

    #[tokio::test]
    async fn test_loan_book_duplicate_is_conflict() {
        let mut loans = MockLoanHistoryRepository::new();
        loans.expect_create_loan().times(1).returning(|l| {
            Err(AppError::conflict(
                "Book is already loaned",
                json!({ "book_name": l.book_name }),
            ))
        });

        let service = service(
            users_with_bart(),
            books_with("Head First Java"),
            loans,
            LoanPolicy::default(),
        );

        let result = service.loan_book("바트", "Head First Java").await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_loan_book_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_name().times(1).returning(|_| Ok(None));
        let mut loans = MockLoanHistoryRepository::new();
        loans.expect_create_loan().times(0);

        let service = service(
            users,
            MockBookRepository::new(),
            loans,
            LoanPolicy::default(),
        );

        let result = service.loan_book("없는사람", "Head First Java").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_loan_book_unregistered_book_rejected_by_policy() {
        let mut loans = MockLoanHistoryRepository::new();
        loans.expect_create_loan().times(0);

        let service = service(
            users_with_bart(),
            books_with("Head First Java"),
            loans,
            LoanPolicy {
                require_registered_book: true,
            },
        );

        let result = service.loan_book("바트", "Unknown Book").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_loan_book_unregistered_book_allowed_without_policy() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_name().times(0);
        let mut loans = MockLoanHistoryRepository::new();
        loans
            .expect_create_loan()
            .times(1)
            .returning(|l| Ok(LoanHistory::new(3, l.user_id, l.book_name, LoanStatus::Loaned)));

        let service = service(
            users_with_bart(),
            books,
            loans,
            LoanPolicy {
                require_registered_book: false,
            },
        );

        let loan = service.loan_book("바트", "Unknown Book").await.unwrap();

        assert_eq!(loan.book_name, "Unknown Book");
    }

    #[tokio::test]
    async fn test_loan_book_blank_book_name() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_name().times(0);

        let service = service(
            users,
            MockBookRepository::new(),
            MockLoanHistoryRepository::new(),
            LoanPolicy::default(),
        );

        let result = service.loan_book("바트", " ").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_return_book_success() {
        let mut loans = MockLoanHistoryRepository::new();
        loans
            .expect_find_outstanding()
            .withf(|user_id, book_name| *user_id == 1 && book_name == "Head First Java")
            .times(1)
            .returning(|user_id, book_name| {
                Ok(Some(LoanHistory::new(
                    10,
                    user_id,
                    book_name.to_string(),
                    LoanStatus::Loaned,
                )))
            });
        loans
            .expect_update_status()
            .withf(|id, from, to| {
                *id == 10 && *from == LoanStatus::Loaned && *to == LoanStatus::Returned
            })
            .times(1)
            .returning(|id, _, to| Ok(LoanHistory::new(id, 1, "Head First Java".to_string(), to)));

        let service = service(
            users_with_bart(),
            MockBookRepository::new(),
            loans,
            LoanPolicy::default(),
        );

        let loan = service.return_book("바트", "Head First Java").await.unwrap();

        assert_eq!(loan.status, LoanStatus::Returned);
        assert!(loan.is_returned());
    }

    #[tokio::test]
    async fn test_return_book_without_outstanding_loan() {
        let mut loans = MockLoanHistoryRepository::new();
        loans
            .expect_find_outstanding()
            .times(1)
            .returning(|_, _| Ok(None));
        loans.expect_update_status().times(0);

        let service = service(
            users_with_bart(),
            MockBookRepository::new(),
            loans,
            LoanPolicy::default(),
        );

        let result = service.return_book("바트", "Head First Java").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_return_book_lost_race_is_not_found() {
        let mut loans = MockLoanHistoryRepository::new();
        loans.expect_find_outstanding().times(1).returning(|u, b| {
            Ok(Some(LoanHistory::new(10, u, b.to_string(), LoanStatus::Loaned)))
        });
        loans.expect_update_status().times(1).returning(|id, _, _| {
            Err(AppError::not_found(
                "Loan is not outstanding",
                json!({ "id": id }),
            ))
        });

        let service = service(
            users_with_bart(),
            MockBookRepository::new(),
            loans,
            LoanPolicy::default(),
        );

        let result = service.return_book("바트", "Head First Java").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_return_book_does_not_consult_catalog() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_name().times(0);
        let mut loans = MockLoanHistoryRepository::new();
        loans.expect_find_outstanding().returning(|u, b| {
            Ok(Some(LoanHistory::new(4, u, b.to_string(), LoanStatus::Loaned)))
        });
        loans
            .expect_update_status()
            .returning(|id, _, to| Ok(LoanHistory::new(id, 1, "절판된 책".to_string(), to)));

        let service = service(users_with_bart(), books, loans, LoanPolicy::default());

        assert!(service.return_book("바트", "절판된 책").await.is_ok());
    }

    #[tokio::test]
    async fn test_count_loaned_books() {
        let mut loans = MockLoanHistoryRepository::new();
        loans
            .expect_count_by_status()
            .withf(|status| *status == LoanStatus::Loaned)
            .times(1)
            .returning(|_| Ok(2));

        let service = service(
            MockUserRepository::new(),
            MockBookRepository::new(),
            loans,
            LoanPolicy::default(),
        );

        assert_eq!(service.count_loaned_books().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_book_statistics_delegates_to_catalog() {
        let mut books = MockBookRepository::new();
        books.expect_count_by_category().times(1).returning(|| {
            Ok(vec![
                CategoryCount {
                    category: BookCategory::Economy,
                    count: 1,
                },
                CategoryCount {
                    category: BookCategory::Computer,
                    count: 2,
                },
            ])
        });

        let service = service(
            MockUserRepository::new(),
            books,
            MockLoanHistoryRepository::new(),
            LoanPolicy::default(),
        );

        let stats = service.book_statistics().await.unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, BookCategory::Computer);
        assert_eq!(stats[0].count, 2);
    }
}
