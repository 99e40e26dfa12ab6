//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod books;
pub mod health;
pub mod users;

pub use books::{
    book_stats_handler, create_book_handler, loan_book_handler, loan_count_handler,
    return_book_handler,
};
pub use health::health_handler;
pub use users::{
    create_user_handler, delete_user_handler, update_user_handler, user_list_handler,
    user_loan_history_handler,
};
