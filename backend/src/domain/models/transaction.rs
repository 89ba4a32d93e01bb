//! Domain model for a transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The closed set of transaction kinds. The sign of a transaction's
/// contribution to any balance comes from this, never from the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

/// One recorded money movement, exclusively owned by its user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub transaction_type: TransactionType,
    /// Free-form grouping label, non-empty.
    pub category: String,
    /// Always positive.
    pub amount: Decimal,
    /// Calendar date; no time-of-day semantics.
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl Transaction {
    /// The amount signed by type: income adds, expense subtracts.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl From<&Transaction> for shared::TransactionDto {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.clone(),
            user_id: transaction.user_id.clone(),
            transaction_type: transaction.transaction_type.as_str().to_string(),
            category: transaction.category.clone(),
            amount: transaction.amount,
            date: transaction.date,
            note: transaction.note.clone(),
        }
    }
}

/// Ordering of ledger query results, always by `(date, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// The tagged filter a ledger query is built from.
///
/// Every optional predicate here becomes one parameterized condition in the
/// storage implementation; the domain layer never concatenates SQL.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// `None` matches both types.
    pub transaction_type: Option<TransactionType>,
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower date bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring match against the note.
    pub note_contains: Option<String>,
    pub order: SortOrder,
    pub limit: Option<u32>,
}

impl TransactionFilter {
    /// Filter for all transactions inside an inclusive date window.
    pub fn date_window(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            date_from: Some(from),
            date_to: Some(to),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }
}
