//! SQLite repository for monthly budget records.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::calendar::MonthKey;
use crate::domain::money;
use crate::domain::models::budget::BudgetRecord;
use crate::storage::sqlite::DbConnection;
use crate::storage::traits::BudgetStorage;

/// Repository for budget operations.
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_budget(row: &SqliteRow) -> Result<BudgetRecord> {
    let amount_raw: String = row.get("budget_amount");
    Ok(BudgetRecord {
        user_id: row.get("user_id"),
        month: MonthKey::from_date(row.get::<NaiveDate, _>("month_year")),
        budget_amount: money::parse_amount(&amount_raw)?,
    })
}

#[async_trait]
impl BudgetStorage for BudgetRepository {
    async fn get_budget(&self, user_id: &str, month: MonthKey) -> Result<Option<BudgetRecord>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, month_year, budget_amount
            FROM budgets
            WHERE user_id = ? AND month_year = ?
            "#,
        )
        .bind(user_id)
        .bind(month.first_day())
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_budget).transpose()
    }

    /// Insert-or-update guarded by the `(user_id, month_year)` primary key,
    /// so concurrent budget-set calls for the same month cannot produce
    /// duplicate records.
    async fn upsert_budget(&self, user_id: &str, month: MonthKey, amount: Decimal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO budgets (user_id, month_year, budget_amount)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id, month_year)
            DO UPDATE SET budget_amount = excluded.budget_amount,
                          updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(user_id)
        .bind(month.first_day())
        .bind(amount.to_string())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_recent_budgets(&self, user_id: &str, count: u32) -> Result<Vec<BudgetRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, month_year, budget_amount
            FROM budgets
            WHERE user_id = ?
            ORDER BY month_year DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(count as i64)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_budget).collect()
    }
}
