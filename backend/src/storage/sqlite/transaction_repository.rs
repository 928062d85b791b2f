use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};
use tracing::warn;

use super::connection::SqliteConnection;
use crate::domain::models::transaction::{Transaction, TransactionType};
use crate::storage::TransactionStorage;

/// SQLite-backed transaction repository
#[derive(Clone)]
pub struct TransactionRepository {
    connection: SqliteConnection,
}

impl TransactionRepository {
    pub fn new(connection: SqliteConnection) -> Self {
        Self { connection }
    }

    fn row_to_transaction(row: &SqliteRow) -> Transaction {
        let type_tag: String = row.get("transaction_type");
        Transaction {
            id: row.get("id"),
            user_id: row.get("user_id"),
            date: row.get("date"),
            description: row.get("description"),
            amount: row.get("amount"),
            category: row.get("category"),
            transaction_type: TransactionType::from_str_or_expense(&type_tag),
        }
    }

    /// Build a `?, ?, ...` placeholder list for an IN clause
    fn placeholders(count: usize) -> String {
        vec!["?"; count].join(", ")
    }
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, user_id, date, description, amount, category, transaction_type)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.user_id)
        .bind(transaction.date)
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(&transaction.category)
        .bind(transaction.transaction_type.as_str())
        .execute(self.connection.pool())
        .await?;

        Ok(())
    }

    async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>> {
        let row = sqlx::query("SELECT * FROM transactions WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(transaction_id)
            .fetch_optional(self.connection.pool())
            .await?;

        Ok(row.as_ref().map(Self::row_to_transaction))
    }

    async fn list_transactions(
        &self,
        user_id: &str,
        limit: Option<u32>,
        after: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        // Resolve the cursor to its (date, id) sort key so pagination stays
        // stable across transactions sharing a date
        let cursor = match after {
            Some(cursor_id) => {
                let row = sqlx::query("SELECT date, id FROM transactions WHERE user_id = ? AND id = ?")
                    .bind(user_id)
                    .bind(&cursor_id)
                    .fetch_optional(self.connection.pool())
                    .await?;
                match row {
                    Some(row) => Some((row.get::<NaiveDate, _>("date"), cursor_id)),
                    None => {
                        warn!("Pagination cursor {} not found, ignoring", cursor_id);
                        None
                    }
                }
            }
            None => None,
        };

        let mut sql = String::from("SELECT * FROM transactions WHERE user_id = ?");
        if cursor.is_some() {
            sql.push_str(" AND (date < ? OR (date = ? AND id < ?))");
        }
        if start_date.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if end_date.is_some() {
            sql.push_str(" AND date <= ?");
        }
        sql.push_str(" ORDER BY date DESC, id DESC");
        if limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut query = sqlx::query(&sql).bind(user_id);
        if let Some((cursor_date, cursor_id)) = &cursor {
            query = query.bind(cursor_date).bind(cursor_date).bind(cursor_id);
        }
        if let Some(start) = start_date {
            query = query.bind(start);
        }
        if let Some(end) = end_date {
            query = query.bind(end);
        }
        if let Some(limit) = limit {
            query = query.bind(limit);
        }

        let rows = query.fetch_all(self.connection.pool()).await?;
        Ok(rows.iter().map(Self::row_to_transaction).collect())
    }

    async fn list_transactions_in_range(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        if end_date < start_date {
            return Err(anyhow!(
                "Invalid date range: {} is after {}",
                start_date,
                end_date
            ));
        }

        let rows = sqlx::query(
            r#"
            SELECT * FROM transactions
            WHERE user_id = ? AND date >= ? AND date <= ?
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(self.connection.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_transaction).collect())
    }

    async fn delete_transactions(&self, user_id: &str, transaction_ids: &[String]) -> Result<u32> {
        if transaction_ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "DELETE FROM transactions WHERE user_id = ? AND id IN ({})",
            Self::placeholders(transaction_ids.len())
        );

        let mut query = sqlx::query(&sql).bind(user_id);
        for id in transaction_ids {
            query = query.bind(id);
        }

        let result = query.execute(self.connection.pool()).await?;
        Ok(result.rows_affected() as u32)
    }

    async fn check_transactions_exist(
        &self,
        user_id: &str,
        transaction_ids: &[String],
    ) -> Result<Vec<String>> {
        if transaction_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id FROM transactions WHERE user_id = ? AND id IN ({})",
            Self::placeholders(transaction_ids.len())
        );

        let mut query = sqlx::query(&sql).bind(user_id);
        for id in transaction_ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(self.connection.pool()).await?;
        Ok(rows.iter().map(|row| row.get("id")).collect())
    }
}
