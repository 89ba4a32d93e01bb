//! Personal-finance aggregation and reporting backend.
//!
//! The domain layer computes summaries, category breakdowns, monthly
//! trends, budget evaluations and assembled reports; the storage layer
//! persists transactions and budgets in SQLite behind backend-agnostic
//! traits. [`Backend`] wires the services over one shared connection.

pub mod domain;
pub mod storage;

use anyhow::Result;

use domain::{
    BudgetService, CategoryService, ReportService, SummaryService, TransactionService,
    TrendService,
};
use storage::sqlite::DbConnection;

/// All services wired over one SQLite connection pool.
#[derive(Clone)]
pub struct Backend {
    pub transactions: TransactionService<DbConnection>,
    pub summaries: SummaryService<DbConnection>,
    pub categories: CategoryService<DbConnection>,
    pub trends: TrendService<DbConnection>,
    pub budgets: BudgetService<DbConnection>,
    pub reports: ReportService<DbConnection>,
}

impl Backend {
    pub fn new(connection: &DbConnection) -> Self {
        Self {
            transactions: TransactionService::new(connection),
            summaries: SummaryService::new(connection),
            categories: CategoryService::new(connection),
            trends: TrendService::new(connection),
            budgets: BudgetService::new(connection),
            reports: ReportService::new(connection),
        }
    }

    /// Connect to the configured database and wire every service.
    pub async fn init() -> Result<Self> {
        let connection = DbConnection::init().await?;
        Ok(Self::new(&connection))
    }
}
