//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. The
//! aggregation engine consumes these capabilities; it never talks to a
//! database directly and never reads user identity from ambient state.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::calendar::MonthKey;
use crate::domain::models::budget::BudgetRecord;
use crate::domain::models::transaction::{Transaction, TransactionFilter};

/// Read/write capability over the transaction ledger.
///
/// Every operation carries an explicit user scope; implementations must
/// translate the tagged [`TransactionFilter`] into a parameterized query.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Query transactions for one user, filtered and ordered by `(date, id)`.
    async fn query(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// Retrieve a specific transaction scoped by `(id, user_id)`.
    async fn get_transaction(&self, user_id: &str, transaction_id: &str)
        -> Result<Option<Transaction>>;

    /// Store a new transaction.
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Update an existing transaction scoped by `(id, user_id)`.
    /// Returns false when no owned row matched.
    async fn update_transaction(&self, transaction: &Transaction) -> Result<bool>;

    /// Delete a transaction scoped by `(id, user_id)`.
    /// Returns false when no owned row matched.
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool>;
}

/// Read/write capability over per-user monthly budget records.
#[async_trait]
pub trait BudgetStorage: Send + Sync {
    /// The budget record for one user-month, if any.
    async fn get_budget(&self, user_id: &str, month: MonthKey) -> Result<Option<BudgetRecord>>;

    /// Insert-or-update the budget for one user-month.
    ///
    /// Must be atomic against concurrent calls for the same key: guarded by
    /// the unique `(user_id, month)` constraint, not a read-then-write.
    async fn upsert_budget(&self, user_id: &str, month: MonthKey, amount: Decimal) -> Result<()>;

    /// The most recent `count` budget records, month descending.
    async fn list_recent_budgets(&self, user_id: &str, count: u32) -> Result<Vec<BudgetRecord>>;
}

/// Trait defining the interface for storage connections.
///
/// Abstracts the concrete backend and provides factory methods for creating
/// repositories, so the domain layer can be wired against any implementation.
pub trait Connection: Send + Sync + Clone {
    type LedgerRepository: LedgerStorage + Clone;
    type BudgetRepository: BudgetStorage + Clone;

    fn create_ledger_repository(&self) -> Self::LedgerRepository;
    fn create_budget_repository(&self) -> Self::BudgetRepository;
}
