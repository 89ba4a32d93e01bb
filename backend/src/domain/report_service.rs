//! Full financial-report assembly.
//!
//! Fans out to the summary, category and trend aggregators concurrently and
//! joins their results into one report value. Assembly is all-or-nothing:
//! any failed read fails the report, and an optional deadline cancels the
//! whole fan-out rather than rendering a partial report.

use std::time::Duration;

use tracing::info;

use crate::domain::calendar::{self, DateRange, MonthLabeler};
use crate::domain::category_service::{CategoryBreakdownEntry, CategoryService};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::transaction::TransactionType;
use crate::domain::summary_service::{PeriodSummary, SummaryService};
use crate::domain::trend_service::{MonthlyTrendEntry, TrendService};
use crate::storage::traits::Connection;

/// How many expense categories the chart projection keeps.
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// The joined output of one report request.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialReport {
    pub summary: PeriodSummary,
    pub income_breakdown: Vec<CategoryBreakdownEntry>,
    pub expense_breakdown: Vec<CategoryBreakdownEntry>,
    pub monthly_trend: Vec<MonthlyTrendEntry>,
}

impl FinancialReport {
    /// Project into the wire shape. `labeler` renders month labels so the
    /// table and chart consumers stay index-aligned with the same text.
    pub fn to_dto(&self, labeler: MonthLabeler) -> shared::ReportData {
        let row = |entry: &CategoryBreakdownEntry| shared::CategoryReportRow {
            category: entry.category.clone(),
            count: entry.count,
            amount: entry.amount,
            percentage: entry.percentage,
        };

        let top: Vec<&CategoryBreakdownEntry> = self
            .expense_breakdown
            .iter()
            .take(TOP_CATEGORY_LIMIT)
            .collect();

        shared::ReportData {
            total_income: self.summary.total_income,
            total_expense: self.summary.total_expense,
            net_balance: self.summary.net_balance,
            savings_rate: self.summary.savings_rate,
            income_report: self.income_breakdown.iter().map(row).collect(),
            expense_report: self.expense_breakdown.iter().map(row).collect(),
            monthly_breakdown: self
                .monthly_trend
                .iter()
                .map(|entry| shared::MonthlyReportRow {
                    month: labeler(entry.month),
                    income: entry.income,
                    expense: entry.expense,
                    balance: entry.balance,
                })
                .collect(),
            top_categories: shared::CategoryChart {
                labels: top.iter().map(|e| e.category.clone()).collect(),
                data: top.iter().map(|e| e.amount).collect(),
            },
            balance_trend: shared::BalanceTrendChart {
                labels: self.monthly_trend.iter().map(|e| labeler(e.month)).collect(),
                income: self.monthly_trend.iter().map(|e| e.income).collect(),
                expense: self.monthly_trend.iter().map(|e| e.expense).collect(),
                balance: self.monthly_trend.iter().map(|e| e.balance).collect(),
            },
        }
    }
}

#[derive(Clone)]
pub struct ReportService<C: Connection> {
    summary: SummaryService<C>,
    category: CategoryService<C>,
    trend: TrendService<C>,
}

impl<C: Connection> ReportService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            summary: SummaryService::new(connection),
            category: CategoryService::new(connection),
            trend: TrendService::new(connection),
        }
    }

    /// Generate the report for `range`, running the four underlying reads
    /// concurrently. A `deadline` bounds the whole fan-out; when it fires
    /// the request fails with a timeout and no partial output.
    pub async fn generate(
        &self,
        user_id: &str,
        range: &DateRange,
        deadline: Option<Duration>,
    ) -> DomainResult<FinancialReport> {
        let fan_out = async {
            tokio::try_join!(
                self.summary.summarize(user_id, range),
                self.category.breakdown(user_id, range, TransactionType::Income),
                self.category.breakdown(user_id, range, TransactionType::Expense),
                self.trend.monthly_trend(user_id, range),
            )
        };

        let (summary, income_breakdown, expense_breakdown, monthly_trend) = match deadline {
            Some(limit) => tokio::time::timeout(limit, fan_out)
                .await
                .map_err(|_| DomainError::Timeout(limit))??,
            None => fan_out.await?,
        };

        info!(
            user_id,
            income_categories = income_breakdown.len(),
            expense_categories = expense_breakdown.len(),
            months = monthly_trend.len(),
            "assembled financial report"
        );

        Ok(FinancialReport {
            summary,
            income_breakdown,
            expense_breakdown,
            monthly_trend,
        })
    }

    /// Generate and project in one step with the default short month label.
    pub async fn generate_dto(
        &self,
        user_id: &str,
        range: &DateRange,
        deadline: Option<Duration>,
    ) -> DomainResult<shared::ReportData> {
        let report = self.generate(user_id, range, deadline).await?;
        Ok(report.to_dto(calendar::short_label))
    }
}
