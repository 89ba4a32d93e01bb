//! Domain layer: aggregation services, budget evaluation and the
//! supporting value types.
//!
//! Services are generic over a [`crate::storage::Connection`] and hold the
//! repositories they read from; all money math lives here, storage only
//! filters and persists.

pub mod budget_service;
pub mod calendar;
pub mod category_service;
pub mod commands;
pub mod errors;
pub mod export_service;
pub mod models;
pub mod money;
pub mod report_service;
pub mod summary_service;
pub mod transaction_service;
pub mod trend_service;

pub use budget_service::{BudgetEvaluation, BudgetHistory, BudgetService, BudgetStatus};
pub use calendar::{DateRange, MonthKey, MonthLabeler};
pub use category_service::{CategoryBreakdownEntry, CategoryService};
pub use errors::{DomainError, DomainResult};
pub use report_service::{FinancialReport, ReportService};
pub use summary_service::{PeriodSummary, SummaryService};
pub use transaction_service::TransactionService;
pub use trend_service::{MonthlyTrendEntry, TrendService};
