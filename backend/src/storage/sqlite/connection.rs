//! SQLite connection management.

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use tracing::info;

use crate::storage::sqlite::{BudgetRepository, LedgerRepository};
use crate::storage::traits::Connection;

const DEFAULT_DATABASE_URL: &str = "sqlite:finance.db";

/// DbConnection manages database access and hands out repositories.
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Create a new database connection, creating the database and schema
    /// if they do not exist yet.
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Initialize the standard database from `DATABASE_URL`, falling back
    /// to a local file database.
    pub async fn init() -> Result<Self> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        info!("connecting to database at {}", url);
        Self::new(&url).await
    }

    /// Initialize a uniquely named in-memory database. Used by tests and
    /// demos so every caller gets an isolated schema.
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);
        Self::new(&url).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema.
    ///
    /// Amounts are stored as TEXT and parsed into decimals at the
    /// repository boundary; dates are ISO-8601 TEXT so range comparisons
    /// stay lexicographic. The budgets primary key enforces the one-record-
    /// per-user-per-month invariant the upsert relies on.
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                type TEXT NOT NULL,
                category TEXT NOT NULL,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                note TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_user_date
            ON transactions(user_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS budgets (
                user_id TEXT NOT NULL,
                month_year TEXT NOT NULL,
                budget_amount TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, month_year)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type LedgerRepository = LedgerRepository;
    type BudgetRepository = BudgetRepository;

    fn create_ledger_repository(&self) -> LedgerRepository {
        LedgerRepository::new(self.clone())
    }

    fn create_budget_repository(&self) -> BudgetRepository {
        BudgetRepository::new(self.clone())
    }
}
