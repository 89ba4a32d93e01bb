//! Storage layer: backend-agnostic traits plus the SQLite implementation.

pub mod sqlite;
pub mod traits;

pub use traits::{BudgetStorage, Connection, LedgerStorage};
