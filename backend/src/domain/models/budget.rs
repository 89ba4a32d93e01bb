//! Domain model for a monthly budget record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::calendar::MonthKey;

/// The declared spending ceiling for one user for one calendar month.
///
/// At most one record exists per `(user_id, month)`; setting a budget for a
/// month that already has one updates it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub user_id: String,
    /// Normalized month identity; joins against transactions key off this,
    /// never off a day-of-month.
    pub month: MonthKey,
    pub budget_amount: Decimal,
}
