//! SQLite repository for the transaction ledger.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::domain::money;
use crate::domain::models::transaction::{
    SortOrder, Transaction, TransactionFilter, TransactionType,
};
use crate::storage::sqlite::DbConnection;
use crate::storage::traits::LedgerStorage;

/// Repository for transaction operations.
#[derive(Clone)]
pub struct LedgerRepository {
    db: DbConnection,
}

impl LedgerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_transaction(row: &SqliteRow) -> Result<Transaction> {
    let type_raw: String = row.get("type");
    let transaction_type = TransactionType::parse(&type_raw)
        .ok_or_else(|| anyhow!("unknown transaction type {:?} in ledger", type_raw))?;
    let amount_raw: String = row.get("amount");

    Ok(Transaction {
        id: row.get("id"),
        user_id: row.get("user_id"),
        transaction_type,
        category: row.get("category"),
        amount: money::parse_amount(&amount_raw)?,
        date: row.get::<NaiveDate, _>("date"),
        note: row.get("note"),
    })
}

#[async_trait]
impl LedgerStorage for LedgerRepository {
    /// Translate the tagged filter into one parameterized query. Each
    /// present predicate contributes exactly one bound condition.
    async fn query(&self, user_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, user_id, type, category, amount, date, note \
             FROM transactions WHERE user_id = ",
        );
        builder.push_bind(user_id);

        if let Some(transaction_type) = filter.transaction_type {
            builder.push(" AND type = ");
            builder.push_bind(transaction_type.as_str());
        }
        if let Some(category) = &filter.category {
            builder.push(" AND category = ");
            builder.push_bind(category);
        }
        if let Some(from) = filter.date_from {
            builder.push(" AND date >= ");
            builder.push_bind(from);
        }
        if let Some(to) = filter.date_to {
            builder.push(" AND date <= ");
            builder.push_bind(to);
        }
        if let Some(note) = &filter.note_contains {
            // SQLite LIKE is case-insensitive for ASCII.
            builder.push(" AND note LIKE ");
            builder.push_bind(format!("%{}%", note));
        }

        builder.push(match filter.order {
            SortOrder::Ascending => " ORDER BY date ASC, id ASC",
            SortOrder::Descending => " ORDER BY date DESC, id DESC",
        });

        if let Some(limit) = filter.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit as i64);
        }

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(row_to_transaction).collect()
    }

    async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, type, category, amount, date, note
            FROM transactions
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(transaction_id)
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_transaction).transpose()
    }

    async fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, user_id, type, category, amount, date, note)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.user_id)
        .bind(transaction.transaction_type.as_str())
        .bind(&transaction.category)
        .bind(transaction.amount.to_string())
        .bind(transaction.date)
        .bind(&transaction.note)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET type = ?, category = ?, amount = ?, date = ?, note = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(transaction.transaction_type.as_str())
        .bind(&transaction.category)
        .bind(transaction.amount.to_string())
        .bind(transaction.date)
        .bind(&transaction.note)
        .bind(&transaction.id)
        .bind(&transaction.user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM transactions WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(transaction_id)
        .bind(user_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
