//! Loan ledger record and its two-state lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a [`LoanHistory`] record.
///
/// The only legal transition is `Loaned -> Returned`; `Returned` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Loaned,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Loaned => "LOANED",
            LoanStatus::Returned => "RETURNED",
        }
    }

    /// Returns true if `self -> next` is a permitted transition.
    pub fn can_transition_to(&self, next: LoanStatus) -> bool {
        matches!((self, next), (LoanStatus::Loaned, LoanStatus::Returned))
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown loan status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for LoanStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOANED" => Ok(LoanStatus::Loaned),
            "RETURNED" => Ok(LoanStatus::Returned),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One loan event: a user borrowed a book, identified by name.
///
/// The book name is a free string; it is not a reference to a catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanHistory {
    pub id: i64,
    pub user_id: i64,
    pub book_name: String,
    pub status: LoanStatus,
}

impl LoanHistory {
    pub fn new(id: i64, user_id: i64, book_name: String, status: LoanStatus) -> Self {
        Self {
            id,
            user_id,
            book_name,
            status,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.status == LoanStatus::Loaned
    }

    pub fn is_returned(&self) -> bool {
        self.status == LoanStatus::Returned
    }
}

/// Input data for opening a loan. New records always start as [`LoanStatus::Loaned`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoan {
    pub user_id: i64,
    pub book_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(LoanStatus::Loaned.can_transition_to(LoanStatus::Returned));
        assert!(!LoanStatus::Returned.can_transition_to(LoanStatus::Loaned));
        assert!(!LoanStatus::Loaned.can_transition_to(LoanStatus::Loaned));
        assert!(!LoanStatus::Returned.can_transition_to(LoanStatus::Returned));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("LOANED".parse::<LoanStatus>(), Ok(LoanStatus::Loaned));
        assert_eq!("RETURNED".parse::<LoanStatus>(), Ok(LoanStatus::Returned));
        assert_eq!(
            "LOST".parse::<LoanStatus>(),
            Err(UnknownStatus("LOST".to_string()))
        );
    }

    #[test]
    fn test_outstanding_and_returned_flags() {
        let open = LoanHistory::new(1, 2, "클린코드".to_string(), LoanStatus::Loaned);
        assert!(open.is_outstanding());
        assert!(!open.is_returned());

        let closed = LoanHistory::new(2, 2, "클린코드".to_string(), LoanStatus::Returned);
        assert!(!closed.is_outstanding());
        assert!(closed.is_returned());
    }
}
