//! SQLite storage backend.

mod budget_repository;
mod connection;
mod ledger_repository;

pub use budget_repository::BudgetRepository;
pub use connection::DbConnection;
pub use ledger_repository::LedgerRepository;
