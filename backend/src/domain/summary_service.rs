//! Period summary aggregation.
//!
//! Computes total income, total expense, net balance and savings rate for an
//! arbitrary inclusive date range. Pure given its ledger input: calling it
//! twice against unchanged data returns identical output.

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::calendar::DateRange;
use crate::domain::errors::{require_user, DomainError, DomainResult};
use crate::domain::money;
use crate::domain::models::transaction::{TransactionFilter, TransactionType};
use crate::storage::traits::{Connection, LedgerStorage};

/// Totals for one user over one date range.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    /// Net balance as a percentage of income, 2 decimal places; 0 when
    /// there is no income in the range.
    pub savings_rate: Decimal,
}

impl PeriodSummary {
    fn from_totals(total_income: Decimal, total_expense: Decimal) -> Self {
        let net_balance = total_income - total_expense;
        Self {
            total_income,
            total_expense,
            net_balance,
            savings_rate: money::percent_of(net_balance, total_income),
        }
    }
}

#[derive(Clone)]
pub struct SummaryService<C: Connection> {
    ledger: C::LedgerRepository,
}

impl<C: Connection> SummaryService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            ledger: connection.create_ledger_repository(),
        }
    }

    /// Summarize all transactions in `range`. An empty range yields all
    /// zeros, not an error.
    pub async fn summarize(&self, user_id: &str, range: &DateRange) -> DomainResult<PeriodSummary> {
        require_user(user_id)?;

        let filter = TransactionFilter::date_window(range.start(), range.end());
        let transactions = self
            .ledger
            .query(user_id, &filter)
            .await
            .map_err(DomainError::data_source)?;

        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        for transaction in &transactions {
            match transaction.transaction_type {
                TransactionType::Income => total_income += transaction.amount,
                TransactionType::Expense => total_expense += transaction.amount,
            }
        }

        info!(
            user_id,
            %total_income,
            %total_expense,
            "summarized {} transactions",
            transactions.len()
        );

        Ok(PeriodSummary::from_totals(total_income, total_expense))
    }
}
