//! Budget evaluation and budget-setting.
//!
//! One classifier decides the budget status everywhere: the dashboard card,
//! the budget page and the history table all read the same tier from the
//! same rule, with the 100% boundary counting as over-budget and whole-number
//! percentage rounding.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::calendar::{self, DateRange, MonthKey};
use crate::domain::commands::budget::SetBudgetCommand;
use crate::domain::errors::{require_user, DomainError, DomainResult};
use crate::domain::money;
use crate::domain::models::transaction::{TransactionFilter, TransactionType};
use crate::storage::traits::{BudgetStorage, Connection, LedgerStorage};

/// Budget status tiers, ordered by evaluation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// No budget record exists for the month; overrides every other tier.
    NoBudgetSet,
    /// Consumption reached or passed 100%.
    OverBudget,
    /// Consumption reached 80%.
    NearLimit,
    WithinBudget,
}

impl BudgetStatus {
    /// Classify a month. `percentage` is the whole-number consumption; the
    /// zero-limit check runs first regardless of spend.
    pub fn classify(budget_limit: Decimal, percentage: i64) -> Self {
        if budget_limit <= Decimal::ZERO {
            BudgetStatus::NoBudgetSet
        } else if percentage >= 100 {
            BudgetStatus::OverBudget
        } else if percentage >= 80 {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::WithinBudget
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BudgetStatus::NoBudgetSet => "no-budget-set",
            BudgetStatus::OverBudget => "over-budget",
            BudgetStatus::NearLimit => "near-limit",
            BudgetStatus::WithinBudget => "within-budget",
        }
    }

    /// Bootstrap alert class used by the screens.
    pub fn css_class(self) -> &'static str {
        match self {
            BudgetStatus::NoBudgetSet => "info",
            BudgetStatus::OverBudget => "danger",
            BudgetStatus::NearLimit => "warning",
            BudgetStatus::WithinBudget => "success",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            BudgetStatus::NoBudgetSet => "info-circle-fill",
            BudgetStatus::OverBudget => "exclamation-triangle-fill",
            BudgetStatus::NearLimit => "exclamation-triangle-fill",
            BudgetStatus::WithinBudget => "check-circle-fill",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BudgetStatus::NoBudgetSet => "Set a budget to start tracking.",
            BudgetStatus::OverBudget => "You've gone over your budget!",
            BudgetStatus::NearLimit => "You're close to your budget limit.",
            BudgetStatus::WithinBudget => "You're well within your budget.",
        }
    }

    /// Row label for the history table.
    pub fn table_label(self) -> &'static str {
        match self {
            BudgetStatus::NoBudgetSet => "No Budget Set",
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::NearLimit => "Near Limit",
            BudgetStatus::WithinBudget => "Within Budget",
        }
    }
}

/// The evaluation of one user-month against its budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetEvaluation {
    pub month: MonthKey,
    /// The declared limit, or zero when no record exists.
    pub budget_limit: Decimal,
    /// Sum of expense amounts dated inside the month.
    pub spent_amount: Decimal,
    pub remaining: Decimal,
    /// Whole-number consumption percentage; 0 when no budget is set.
    pub percentage: i64,
    pub status: BudgetStatus,
}

/// Rolling evaluation of the most recent budgeted months.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetHistory {
    /// Most recent month first, matching storage order.
    pub entries: Vec<BudgetEvaluation>,
}

impl BudgetHistory {
    /// Oldest first, for chart/series consumers.
    pub fn chronological(&self) -> Vec<BudgetEvaluation> {
        let mut entries = self.entries.clone();
        entries.reverse();
        entries
    }
}

#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    ledger: C::LedgerRepository,
    budgets: C::BudgetRepository,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            ledger: connection.create_ledger_repository(),
            budgets: connection.create_budget_repository(),
        }
    }

    /// Declare (or replace) the budget for one month. The write is an
    /// atomic upsert on the `(user, month)` key.
    pub async fn set_budget(&self, user_id: &str, command: SetBudgetCommand) -> DomainResult<()> {
        require_user(user_id)?;
        if command.amount <= Decimal::ZERO {
            return Err(DomainError::validation(
                "budget amount must be greater than 0",
            ));
        }

        self.budgets
            .upsert_budget(user_id, command.month, money::round_currency(command.amount))
            .await
            .map_err(DomainError::data_source)?;

        info!(user_id, month = %command.month.to_year_month(), "budget set");
        Ok(())
    }

    /// Evaluate one month: limit lookup, expense sum, consumption and tier.
    pub async fn evaluate_month(
        &self,
        user_id: &str,
        month: MonthKey,
    ) -> DomainResult<BudgetEvaluation> {
        require_user(user_id)?;

        let budget_limit = self
            .budgets
            .get_budget(user_id, month)
            .await
            .map_err(DomainError::data_source)?
            .map(|record| record.budget_amount)
            .unwrap_or(Decimal::ZERO);

        let spent_amount = self.spent_in_month(user_id, month).await?;
        Ok(Self::evaluate_with_limit(month, budget_limit, spent_amount))
    }

    /// Evaluate "now": the current calendar month.
    pub async fn evaluate_current_month(&self, user_id: &str) -> DomainResult<BudgetEvaluation> {
        let today = Local::now().date_naive();
        self.evaluate_month(user_id, MonthKey::from_date(today)).await
    }

    /// Evaluate the most recent `months` months that have a budget record,
    /// most recent first.
    pub async fn history(&self, user_id: &str, months: u32) -> DomainResult<BudgetHistory> {
        require_user(user_id)?;

        let records = self
            .budgets
            .list_recent_budgets(user_id, months)
            .await
            .map_err(DomainError::data_source)?;

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let spent = self.spent_in_month(user_id, record.month).await?;
            entries.push(Self::evaluate_with_limit(
                record.month,
                record.budget_amount,
                spent,
            ));
        }

        Ok(BudgetHistory { entries })
    }

    /// Assemble the budget screen payload for `today`: current-month
    /// evaluation plus the rolling history and its chart series.
    pub async fn overview(
        &self,
        user_id: &str,
        today: NaiveDate,
        history_months: u32,
    ) -> DomainResult<shared::BudgetOverview> {
        let current_month = MonthKey::from_date(today);
        let current = self.evaluate_month(user_id, current_month).await?;
        let history = self.history(user_id, history_months).await?;

        let budget_history: Vec<shared::BudgetHistoryRow> = history
            .entries
            .iter()
            .map(|entry| shared::BudgetHistoryRow {
                month: calendar::long_label(entry.month),
                budget: entry.budget_limit,
                spent: entry.spent_amount,
                remaining: entry.remaining,
                status: entry.status.table_label().to_string(),
                status_class: entry.status.css_class().to_string(),
            })
            .collect();

        let chronological = history.chronological();
        let chart_data = shared::BudgetChart {
            labels: chronological.iter().map(|e| calendar::long_label(e.month)).collect(),
            budget: chronological.iter().map(|e| e.budget_limit).collect(),
            spent: chronological.iter().map(|e| e.spent_amount).collect(),
            remaining: chronological.iter().map(|e| e.remaining).collect(),
        };

        Ok(shared::BudgetOverview {
            current_month: current_month.to_year_month(),
            budget_limit: current.budget_limit,
            spent_amount: current.spent_amount,
            remaining: current.remaining,
            percentage: current.percentage,
            status: current.status.as_str().to_string(),
            status_message: current.status.message().to_string(),
            status_icon: current.status.icon().to_string(),
            budget_history,
            chart_data,
        })
    }

    fn evaluate_with_limit(
        month: MonthKey,
        budget_limit: Decimal,
        spent_amount: Decimal,
    ) -> BudgetEvaluation {
        let percentage = money::whole_percent_of(spent_amount, budget_limit);
        BudgetEvaluation {
            month,
            budget_limit,
            spent_amount,
            remaining: budget_limit - spent_amount,
            percentage,
            status: BudgetStatus::classify(budget_limit, percentage),
        }
    }

    async fn spent_in_month(&self, user_id: &str, month: MonthKey) -> DomainResult<Decimal> {
        let window = DateRange::month(month);
        let filter = TransactionFilter::date_window(window.start(), window.end())
            .with_type(TransactionType::Expense);
        let expenses = self
            .ledger
            .query(user_id, &filter)
            .await
            .map_err(DomainError::data_source)?;

        Ok(expenses.iter().map(|t| t.amount).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::DbConnection;
    use crate::test_support::seed_transaction;
    use rust_decimal_macros::dec;

    fn month(year: i32, m: u32) -> MonthKey {
        MonthKey::new(year, m).unwrap()
    }

    async fn service_with_budget(limit: &str) -> (DbConnection, BudgetService<DbConnection>) {
        let db = DbConnection::init_test().await.unwrap();
        let service = BudgetService::new(&db);
        service
            .set_budget(
                "u1",
                SetBudgetCommand {
                    month: month(2025, 5),
                    amount: limit.parse().unwrap(),
                },
            )
            .await
            .unwrap();
        (db, service)
    }

    #[tokio::test]
    async fn status_boundaries_at_79_80_and_100_percent() {
        let (db, service) = service_with_budget("100").await;

        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "79", "2025-05-03").await;
        let eval = service.evaluate_month("u1", month(2025, 5)).await.unwrap();
        assert_eq!(eval.percentage, 79);
        assert_eq!(eval.status, BudgetStatus::WithinBudget);

        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "1", "2025-05-04").await;
        let eval = service.evaluate_month("u1", month(2025, 5)).await.unwrap();
        assert_eq!(eval.percentage, 80);
        assert_eq!(eval.status, BudgetStatus::NearLimit);

        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "20", "2025-05-05").await;
        let eval = service.evaluate_month("u1", month(2025, 5)).await.unwrap();
        assert_eq!(eval.percentage, 100);
        assert_eq!(eval.status, BudgetStatus::OverBudget);
    }

    #[tokio::test]
    async fn exact_limit_counts_as_over_budget() {
        let (db, service) = service_with_budget("500").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "Rent", "500", "2025-05-01").await;

        let eval = service.evaluate_month("u1", month(2025, 5)).await.unwrap();
        assert_eq!(eval.percentage, 100);
        assert_eq!(eval.status, BudgetStatus::OverBudget);
        assert_eq!(eval.remaining, Decimal::ZERO);
    }

    #[tokio::test]
    async fn no_budget_record_wins_regardless_of_spend() {
        let db = DbConnection::init_test().await.unwrap();
        let service = BudgetService::new(&db);
        seed_transaction(&db, "u1", TransactionType::Expense, "Rent", "750", "2025-05-01").await;

        let eval = service.evaluate_month("u1", month(2025, 5)).await.unwrap();
        assert_eq!(eval.budget_limit, Decimal::ZERO);
        assert_eq!(eval.percentage, 0);
        assert_eq!(eval.status, BudgetStatus::NoBudgetSet);
        assert_eq!(eval.spent_amount, dec!(750.00));
    }

    #[tokio::test]
    async fn income_never_counts_against_the_budget() {
        let (db, service) = service_with_budget("100").await;
        seed_transaction(&db, "u1", TransactionType::Income, "Salary", "5000", "2025-05-02").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "40", "2025-05-02").await;

        let eval = service.evaluate_month("u1", month(2025, 5)).await.unwrap();
        assert_eq!(eval.spent_amount, dec!(40.00));
        assert_eq!(eval.percentage, 40);
        assert_eq!(eval.status, BudgetStatus::WithinBudget);
    }

    #[tokio::test]
    async fn history_is_most_recent_first_with_chronological_projection() {
        let db = DbConnection::init_test().await.unwrap();
        let service = BudgetService::new(&db);
        for m in 1..=4u32 {
            service
                .set_budget(
                    "u1",
                    SetBudgetCommand {
                        month: month(2025, m),
                        amount: dec!(100),
                    },
                )
                .await
                .unwrap();
        }
        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "120", "2025-02-10").await;

        let history = service.history("u1", 3).await.unwrap();
        let months: Vec<u32> = history.entries.iter().map(|e| e.month.month).collect();
        assert_eq!(months, [4, 3, 2]);

        let chrono_months: Vec<u32> = history
            .chronological()
            .iter()
            .map(|e| e.month.month)
            .collect();
        assert_eq!(chrono_months, [2, 3, 4]);

        // the same classifier runs in history rows
        let feb = history.entries.iter().find(|e| e.month.month == 2).unwrap();
        assert_eq!(feb.status, BudgetStatus::OverBudget);
    }

    #[tokio::test]
    async fn set_budget_rejects_non_positive_amounts() {
        let db = DbConnection::init_test().await.unwrap();
        let service = BudgetService::new(&db);

        let err = service
            .set_budget(
                "u1",
                SetBudgetCommand {
                    month: month(2025, 5),
                    amount: Decimal::ZERO,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn overview_carries_status_presentation_fields() {
        let (db, service) = service_with_budget("200").await;
        seed_transaction(&db, "u1", TransactionType::Expense, "Food", "170", "2025-05-06").await;

        let overview = service
            .overview("u1", "2025-05-20".parse().unwrap(), 6)
            .await
            .unwrap();

        assert_eq!(overview.current_month, "2025-05");
        assert_eq!(overview.percentage, 85);
        assert_eq!(overview.status, "near-limit");
        assert_eq!(overview.status_icon, "exclamation-triangle-fill");
        assert_eq!(overview.budget_history.len(), 1);
        assert_eq!(overview.budget_history[0].month, "May 2025");
        assert_eq!(overview.chart_data.labels, vec!["May 2025".to_string()]);
    }
}
