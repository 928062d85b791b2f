use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::connection::SqliteConnection;
use crate::domain::models::profile::UserProfile;
use crate::storage::ProfileStorage;

/// SQLite-backed user profile repository
#[derive(Clone)]
pub struct ProfileRepository {
    connection: SqliteConnection,
}

impl ProfileRepository {
    pub fn new(connection: SqliteConnection) -> Self {
        Self { connection }
    }

    fn row_to_profile(row: &SqliteRow) -> UserProfile {
        let age: Option<i64> = row.get("age");
        UserProfile {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            age: age.map(|a| a as u32),
            job: row.get("job"),
            address: row.get("address"),
            photo_url: row.get("photo_url"),
            budget_total: row.get("budget_total"),
            budget_left: row.get("budget_left"),
            income_total: row.get("income_total"),
            expense_total: row.get("expense_total"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl ProfileStorage for ProfileRepository {
    async fn store_profile(&self, profile: &UserProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles
                (id, name, email, age, job, address, photo_url,
                 budget_total, budget_left, income_total, expense_total,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(profile.age.map(|a| a as i64))
        .bind(&profile.job)
        .bind(&profile.address)
        .bind(&profile.photo_url)
        .bind(profile.budget_total)
        .bind(profile.budget_left)
        .bind(profile.income_total)
        .bind(profile.expense_total)
        .bind(&profile.created_at)
        .bind(&profile.updated_at)
        .execute(self.connection.pool())
        .await?;

        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let row = sqlx::query("SELECT * FROM profiles WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.connection.pool())
            .await?;

        Ok(row.as_ref().map(Self::row_to_profile))
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles SET
                name = ?, email = ?, age = ?, job = ?, address = ?, photo_url = ?,
                budget_total = ?, budget_left = ?, income_total = ?, expense_total = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(profile.age.map(|a| a as i64))
        .bind(&profile.job)
        .bind(&profile.address)
        .bind(&profile.photo_url)
        .bind(profile.budget_total)
        .bind(profile.budget_left)
        .bind(profile.income_total)
        .bind(profile.expense_total)
        .bind(&profile.updated_at)
        .bind(&profile.id)
        .execute(self.connection.pool())
        .await?;

        Ok(())
    }
}
