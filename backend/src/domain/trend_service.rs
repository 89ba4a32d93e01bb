//! Month-by-month trend aggregation.
//!
//! Buckets a user's transactions by calendar month across a range and
//! produces a contiguous chronological series. Months with no activity are
//! zero-filled rather than dropped: a naive group-by silently loses empty
//! months, which breaks any chart or table consuming a contiguous time axis.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::calendar::{DateRange, MonthKey};
use crate::domain::errors::{require_user, DomainError, DomainResult};
use crate::domain::models::transaction::{TransactionFilter, TransactionType};
use crate::storage::traits::{Connection, LedgerStorage};

/// One calendar month of the trend series.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTrendEntry {
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Clone)]
pub struct TrendService<C: Connection> {
    ledger: C::LedgerRepository,
}

impl<C: Connection> TrendService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            ledger: connection.create_ledger_repository(),
        }
    }

    /// The trend series for every month fully or partially inside `range`,
    /// oldest first. Length always equals the number of months the range
    /// spans, independent of the data.
    pub async fn monthly_trend(
        &self,
        user_id: &str,
        range: &DateRange,
    ) -> DomainResult<Vec<MonthlyTrendEntry>> {
        require_user(user_id)?;

        // Pre-seed every month in range so empty ones survive aggregation.
        let mut buckets: BTreeMap<MonthKey, (Decimal, Decimal)> = range
            .months()
            .into_iter()
            .map(|month| (month, (Decimal::ZERO, Decimal::ZERO)))
            .collect();

        let filter = TransactionFilter::date_window(range.start(), range.end());
        let transactions = self
            .ledger
            .query(user_id, &filter)
            .await
            .map_err(DomainError::data_source)?;

        for transaction in &transactions {
            let month = MonthKey::from_date(transaction.date);
            // date filtering guarantees the bucket exists
            if let Some((income, expense)) = buckets.get_mut(&month) {
                match transaction.transaction_type {
                    TransactionType::Income => *income += transaction.amount,
                    TransactionType::Expense => *expense += transaction.amount,
                }
            }
        }

        let series: Vec<MonthlyTrendEntry> = buckets
            .into_iter()
            .map(|(month, (income, expense))| MonthlyTrendEntry {
                month,
                income,
                expense,
                balance: income - expense,
            })
            .collect();

        info!(user_id, months = series.len(), "computed monthly trend");
        Ok(series)
    }
}
