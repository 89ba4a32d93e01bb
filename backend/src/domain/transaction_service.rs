//! Transaction lifecycle: record, list, edit, delete.
//!
//! Every operation is scoped to one user. Edits and deletes match on
//! `(id, user_id)` and report whether a row was actually touched, so a
//! caller holding someone else's id simply gets `false`.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::commands::transactions::{CreateTransactionCommand, UpdateTransactionCommand};
use crate::domain::errors::{require_user, DomainError, DomainResult};
use crate::domain::money;
use crate::domain::models::transaction::{Transaction, TransactionFilter};
use crate::storage::traits::{Connection, LedgerStorage};

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    ledger: C::LedgerRepository,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            ledger: connection.create_ledger_repository(),
        }
    }

    /// Record a new transaction and return it with its generated id.
    pub async fn create(
        &self,
        user_id: &str,
        command: CreateTransactionCommand,
    ) -> DomainResult<Transaction> {
        require_user(user_id)?;
        validate_fields(&command.category, command.amount)?;

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            transaction_type: command.transaction_type,
            category: command.category.trim().to_string(),
            amount: money::round_currency(command.amount),
            date: command.date,
            note: command.note.filter(|n| !n.trim().is_empty()),
        };

        self.ledger
            .store_transaction(&transaction)
            .await
            .map_err(DomainError::data_source)?;

        info!(
            user_id,
            transaction_id = %transaction.id,
            transaction_type = transaction.transaction_type.as_str(),
            "recorded transaction"
        );
        Ok(transaction)
    }

    /// List transactions matching `filter`. An inverted date window is a
    /// validation error rather than an empty result.
    pub async fn list(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> DomainResult<Vec<Transaction>> {
        require_user(user_id)?;
        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
            if from > to {
                return Err(DomainError::validation(
                    "date_from must not be after date_to",
                ));
            }
        }

        self.ledger
            .query(user_id, filter)
            .await
            .map_err(DomainError::data_source)
    }

    /// List transactions projected to the wire shape.
    pub async fn list_dto(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> DomainResult<Vec<shared::TransactionDto>> {
        Ok(self.list(user_id, filter).await?.iter().map(Into::into).collect())
    }

    pub async fn get(&self, user_id: &str, id: &str) -> DomainResult<Option<Transaction>> {
        require_user(user_id)?;
        self.ledger
            .get_transaction(user_id, id)
            .await
            .map_err(DomainError::data_source)
    }

    /// Edit an existing transaction. Returns `false` when no row owned by
    /// this user has the given id.
    pub async fn update(
        &self,
        user_id: &str,
        command: UpdateTransactionCommand,
    ) -> DomainResult<bool> {
        require_user(user_id)?;
        validate_fields(&command.category, command.amount)?;

        let transaction = Transaction {
            id: command.id,
            user_id: user_id.to_string(),
            transaction_type: command.transaction_type,
            category: command.category.trim().to_string(),
            amount: money::round_currency(command.amount),
            date: command.date,
            note: command.note.filter(|n| !n.trim().is_empty()),
        };

        let updated = self
            .ledger
            .update_transaction(&transaction)
            .await
            .map_err(DomainError::data_source)?;

        info!(user_id, transaction_id = %transaction.id, updated, "updated transaction");
        Ok(updated)
    }

    /// Delete a transaction. Returns `false` when no row owned by this user
    /// has the given id.
    pub async fn delete(&self, user_id: &str, id: &str) -> DomainResult<bool> {
        require_user(user_id)?;

        let deleted = self
            .ledger
            .delete_transaction(user_id, id)
            .await
            .map_err(DomainError::data_source)?;

        info!(user_id, transaction_id = id, deleted, "deleted transaction");
        Ok(deleted)
    }
}

fn validate_fields(category: &str, amount: Decimal) -> DomainResult<()> {
    if category.trim().is_empty() {
        return Err(DomainError::validation("category is required"));
    }
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation("amount must be greater than 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::transaction::TransactionType;
    use crate::storage::sqlite::DbConnection;
    use rust_decimal_macros::dec;

    fn create_command(amount: &str) -> CreateTransactionCommand {
        CreateTransactionCommand {
            transaction_type: TransactionType::Expense,
            category: "Food".to_string(),
            amount: amount.parse().unwrap(),
            date: "2025-01-10".parse().unwrap(),
            note: Some("lunch".to_string()),
        }
    }

    #[tokio::test]
    async fn create_assigns_an_id_and_persists() {
        let db = DbConnection::init_test().await.unwrap();
        let service = TransactionService::new(&db);

        let created = service.create("u1", create_command("12.5")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.amount, dec!(12.50));

        let fetched = service.get("u1", &created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn create_rejects_blank_category_and_non_positive_amount() {
        let db = DbConnection::init_test().await.unwrap();
        let service = TransactionService::new(&db);

        let mut command = create_command("10");
        command.category = "   ".to_string();
        let err = service.create("u1", command).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service.create("u1", create_command("0")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn list_rejects_an_inverted_date_window() {
        let db = DbConnection::init_test().await.unwrap();
        let service = TransactionService::new(&db);

        let filter = TransactionFilter::date_window(
            "2025-02-01".parse().unwrap(),
            "2025-01-01".parse().unwrap(),
        );
        let err = service.list("u1", &filter).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn dto_projection_serializes_type_under_the_wire_name() {
        let db = DbConnection::init_test().await.unwrap();
        let service = TransactionService::new(&db);
        service.create("u1", create_command("10")).await.unwrap();

        let dtos = service
            .list_dto("u1", &TransactionFilter::default())
            .await
            .unwrap();
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].transaction_type, "expense");

        let json = serde_json::to_value(&dtos[0]).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["userId"], "u1");
    }

    #[tokio::test]
    async fn update_is_scoped_to_the_owner() {
        let db = DbConnection::init_test().await.unwrap();
        let service = TransactionService::new(&db);
        let created = service.create("u1", create_command("10")).await.unwrap();

        let command = UpdateTransactionCommand {
            id: created.id.clone(),
            transaction_type: TransactionType::Expense,
            category: "Groceries".to_string(),
            amount: dec!(15),
            date: created.date,
            note: None,
        };
        assert!(!service.update("intruder", command.clone()).await.unwrap());
        assert!(service.update("u1", command).await.unwrap());

        let fetched = service.get("u1", &created.id).await.unwrap().unwrap();
        assert_eq!(fetched.category, "Groceries");
        assert_eq!(fetched.amount, dec!(15.00));
        assert_eq!(fetched.note, None);
    }

    #[tokio::test]
    async fn delete_is_scoped_to_the_owner() {
        let db = DbConnection::init_test().await.unwrap();
        let service = TransactionService::new(&db);
        let created = service.create("u1", create_command("10")).await.unwrap();

        assert!(!service.delete("intruder", &created.id).await.unwrap());
        assert!(service.delete("u1", &created.id).await.unwrap());
        assert_eq!(service.get("u1", &created.id).await.unwrap(), None);
    }
}
