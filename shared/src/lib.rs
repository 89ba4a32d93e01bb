//! Shared DTO types for the finance tracker.
//!
//! These are the wire-stable shapes handed to rendering and export
//! collaborators (report screen, CSV exporter, printable report). Field
//! names are part of the contract and serialize as `camelCase`; all money
//! values are plain numerics with no locale formatting applied.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One transaction as exposed to consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: String,
    pub user_id: String,
    /// `income` or `expense`; closed set.
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub category: String,
    /// Always positive; the sign of the balance contribution comes from the type.
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
}

/// One row of a per-category breakdown for a single transaction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReportRow {
    pub category: String,
    /// Number of transactions in the category within the range.
    pub count: u32,
    /// Summed amount for the category.
    pub amount: Decimal,
    /// Share of the type total, rounded to 2 decimal places; 0 when the
    /// type total is zero.
    pub percentage: Decimal,
}

/// One calendar month of the trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportRow {
    /// Rendered month label, e.g. "Jan 2025".
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Chart-friendly labels/data pair for the top expense categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChart {
    pub labels: Vec<String>,
    pub data: Vec<Decimal>,
}

/// Index-aligned parallel series for the month-by-month balance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTrendChart {
    pub labels: Vec<String>,
    pub income: Vec<Decimal>,
    pub expense: Vec<Decimal>,
    pub balance: Vec<Decimal>,
}

/// The assembled financial report.
///
/// This is the single source of truth consumed identically by the report
/// screen, the CSV exporter and the printable exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    /// Net balance as a percentage of total income, 2 decimal places;
    /// 0 when total income is zero.
    pub savings_rate: Decimal,
    pub income_report: Vec<CategoryReportRow>,
    pub expense_report: Vec<CategoryReportRow>,
    pub monthly_breakdown: Vec<MonthlyReportRow>,
    /// First five rows of `expense_report`, projected to labels/data.
    pub top_categories: CategoryChart,
    pub balance_trend: BalanceTrendChart,
}

/// One row of the budget history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetHistoryRow {
    /// Rendered month label, e.g. "January 2025".
    pub month: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub status: String,
    pub status_class: String,
}

/// Chronological chart series for the budget history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetChart {
    pub labels: Vec<String>,
    pub budget: Vec<Decimal>,
    pub spent: Vec<Decimal>,
    pub remaining: Vec<Decimal>,
}

/// The budget screen payload: current-month evaluation plus rolling history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    /// Current month as "YYYY-MM".
    pub current_month: String,
    pub budget_limit: Decimal,
    pub spent_amount: Decimal,
    pub remaining: Decimal,
    /// Whole-number consumption percentage; 0 when no budget is set.
    pub percentage: i64,
    pub status: String,
    pub status_message: String,
    pub status_icon: String,
    /// Most recent month first.
    pub budget_history: Vec<BudgetHistoryRow>,
    pub chart_data: BudgetChart,
}
