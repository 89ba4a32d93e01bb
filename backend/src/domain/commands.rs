//! Domain-level command and query types.
//!
//! These structs are the inputs services accept inside the domain layer.
//! Outer layers (screens, exporters) are responsible for mapping their own
//! request shapes onto these before calling in.

pub mod transactions {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::models::transaction::TransactionType;

    /// Input for recording a new transaction.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub transaction_type: TransactionType,
        pub category: String,
        pub amount: Decimal,
        pub date: NaiveDate,
        pub note: Option<String>,
    }

    /// Input for editing an existing transaction. Any field except
    /// ownership may change; the edit is scoped by `(id, user_id)`.
    #[derive(Debug, Clone)]
    pub struct UpdateTransactionCommand {
        pub id: String,
        pub transaction_type: TransactionType,
        pub category: String,
        pub amount: Decimal,
        pub date: NaiveDate,
        pub note: Option<String>,
    }
}

pub mod budget {
    use rust_decimal::Decimal;

    use crate::domain::calendar::MonthKey;

    /// Input for the budget-setting action (upsert semantics).
    #[derive(Debug, Clone)]
    pub struct SetBudgetCommand {
        pub month: MonthKey,
        pub amount: Decimal,
    }
}
