//! Seeds an in-memory database and prints an assembled report as JSON.
//!
//! Run with `cargo run -p finance-tracker-backend --example report_demo`.

use anyhow::Result;
use finance_tracker_backend::domain::calendar::{DateRange, MonthKey};
use finance_tracker_backend::domain::commands::budget::SetBudgetCommand;
use finance_tracker_backend::domain::commands::transactions::CreateTransactionCommand;
use finance_tracker_backend::domain::export_service;
use finance_tracker_backend::domain::models::transaction::TransactionType;
use finance_tracker_backend::storage::sqlite::DbConnection;
use finance_tracker_backend::Backend;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let connection = DbConnection::init_test().await?;
    let backend = Backend::new(&connection);
    let user = "demo-user";

    let seed = [
        (TransactionType::Income, "Salary", "42000", "2025-01-01"),
        (TransactionType::Expense, "Rent", "12000", "2025-01-03"),
        (TransactionType::Expense, "Food", "5400", "2025-01-12"),
        (TransactionType::Income, "Salary", "42000", "2025-02-01"),
        (TransactionType::Expense, "Rent", "12000", "2025-02-03"),
        (TransactionType::Expense, "Travel", "8600", "2025-02-18"),
    ];
    for (transaction_type, category, amount, date) in seed {
        backend
            .transactions
            .create(
                user,
                CreateTransactionCommand {
                    transaction_type,
                    category: category.to_string(),
                    amount: amount.parse()?,
                    date: date.parse()?,
                    note: None,
                },
            )
            .await?;
    }

    backend
        .budgets
        .set_budget(
            user,
            SetBudgetCommand {
                month: MonthKey::new(2025, 2)?,
                amount: "20000".parse()?,
            },
        )
        .await?;

    let range = DateRange::new("2025-01-01".parse()?, "2025-02-28".parse()?)?;
    let report = backend.reports.generate_dto(user, &range, None).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let overview = backend
        .budgets
        .overview(user, "2025-02-20".parse()?, 6)
        .await?;
    println!("{}", serde_json::to_string_pretty(&overview)?);

    println!("{}", export_service::report_to_text(&report));
    Ok(())
}
