//! Per-category breakdown aggregation.
//!
//! Groups one transaction type by category within a range and computes
//! count, summed amount and share-of-total percentage. Income and expense
//! breakdowns are evaluated independently of each other.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::calendar::DateRange;
use crate::domain::errors::{require_user, DomainError, DomainResult};
use crate::domain::money;
use crate::domain::models::transaction::{TransactionFilter, TransactionType};
use crate::storage::traits::{Connection, LedgerStorage};

/// One category's aggregate within a breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdownEntry {
    pub category: String,
    pub count: u32,
    pub amount: Decimal,
    /// Share of the type total, 2 decimal places; 0 when the type total
    /// is zero.
    pub percentage: Decimal,
}

#[derive(Clone)]
pub struct CategoryService<C: Connection> {
    ledger: C::LedgerRepository,
}

impl<C: Connection> CategoryService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            ledger: connection.create_ledger_repository(),
        }
    }

    /// Break down one transaction type by category.
    ///
    /// Ordering is amount descending; equal amounts fall back to category
    /// name ascending so the ranking is stable. A top-N view is the first
    /// N elements of the returned sequence.
    pub async fn breakdown(
        &self,
        user_id: &str,
        range: &DateRange,
        transaction_type: TransactionType,
    ) -> DomainResult<Vec<CategoryBreakdownEntry>> {
        require_user(user_id)?;

        let filter = TransactionFilter::date_window(range.start(), range.end())
            .with_type(transaction_type);
        let transactions = self
            .ledger
            .query(user_id, &filter)
            .await
            .map_err(DomainError::data_source)?;

        let mut groups: HashMap<String, (u32, Decimal)> = HashMap::new();
        let mut type_total = Decimal::ZERO;
        for transaction in &transactions {
            let entry = groups
                .entry(transaction.category.clone())
                .or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += transaction.amount;
            type_total += transaction.amount;
        }

        let mut breakdown: Vec<CategoryBreakdownEntry> = groups
            .into_iter()
            .map(|(category, (count, amount))| CategoryBreakdownEntry {
                category,
                count,
                amount,
                percentage: money::percent_of(amount, type_total),
            })
            .collect();

        breakdown.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        info!(
            user_id,
            transaction_type = transaction_type.as_str(),
            categories = breakdown.len(),
            "computed category breakdown"
        );

        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::DbConnection;
    use crate::test_support::{range, seed_transaction};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn breakdown_ranks_by_amount_descending() {
        let db = DbConnection::init_test().await.unwrap();
        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "300", "2025-01-10").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "Rent", "200", "2025-01-15").await;
        seed_transaction(&db, "u1", TransactionType::Income, "Salary", "1000", "2025-01-05").await;

        let service = CategoryService::new(&db);
        let breakdown = service
            .breakdown("u1", &range("2025-01-01", "2025-01-31"), TransactionType::Expense)
            .await
            .unwrap();

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Food");
        assert_eq!(breakdown[0].count, 1);
        assert_eq!(breakdown[0].amount, dec!(300.00));
        assert_eq!(breakdown[0].percentage, dec!(60.00));
        assert_eq!(breakdown[1].category, "Rent");
        assert_eq!(breakdown[1].amount, dec!(200.00));
        assert_eq!(breakdown[1].percentage, dec!(40.00));
    }

    #[tokio::test]
    async fn ties_break_on_category_name_ascending() {
        let db = DbConnection::init_test().await.unwrap();
        seed_transaction(&db, "u1", TransactionType::Expense, "Travel", "100", "2025-01-03").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "Books", "100", "2025-01-04").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "Music", "100", "2025-01-05").await;

        let service = CategoryService::new(&db);
        let breakdown = service
            .breakdown("u1", &range("2025-01-01", "2025-01-31"), TransactionType::Expense)
            .await
            .unwrap();

        let names: Vec<_> = breakdown.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, ["Books", "Music", "Travel"]);
    }

    #[tokio::test]
    async fn percentages_sum_to_one_hundred() {
        let db = DbConnection::init_test().await.unwrap();
        seed_transaction(&db, "u1", TransactionType::Expense, "A", "1", "2025-01-01").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "B", "1", "2025-01-02").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "C", "1", "2025-01-03").await;

        let service = CategoryService::new(&db);
        let breakdown = service
            .breakdown("u1", &range("2025-01-01", "2025-01-31"), TransactionType::Expense)
            .await
            .unwrap();

        let total: Decimal = breakdown.iter().map(|e| e.percentage).sum();
        // within rounding tolerance of 0.01 per entry
        assert!((total - dec!(100.00)).abs() <= dec!(0.03), "sum was {total}");
    }

    #[tokio::test]
    async fn counts_multiple_rows_per_category() {
        let db = DbConnection::init_test().await.unwrap();
        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "20", "2025-01-02").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "30", "2025-01-09").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "50", "2025-01-16").await;

        let service = CategoryService::new(&db);
        let breakdown = service
            .breakdown("u1", &range("2025-01-01", "2025-01-31"), TransactionType::Expense)
            .await
            .unwrap();

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].count, 3);
        assert_eq!(breakdown[0].amount, dec!(100.00));
        assert_eq!(breakdown[0].percentage, dec!(100.00));
    }

    #[tokio::test]
    async fn empty_type_total_yields_empty_breakdown() {
        let db = DbConnection::init_test().await.unwrap();
        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "20", "2025-01-02").await;

        let service = CategoryService::new(&db);
        let breakdown = service
            .breakdown("u1", &range("2025-01-01", "2025-01-31"), TransactionType::Income)
            .await
            .unwrap();

        assert!(breakdown.is_empty());
    }
}
