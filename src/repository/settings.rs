//! Site settings repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::setting::SiteSetting,
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all settings ordered by key
    pub async fn list(&self) -> AppResult<Vec<SiteSetting>> {
        let settings = sqlx::query_as::<_, SiteSetting>(
            "SELECT * FROM site_settings ORDER BY setting_key",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(settings)
    }

    /// Get one setting by key
    pub async fn get(&self, key: &str) -> AppResult<SiteSetting> {
        sqlx::query_as::<_, SiteSetting>("SELECT * FROM site_settings WHERE setting_key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Setting '{}' not found", key)))
    }

    /// Update a setting's value, stamping the acting admin
    pub async fn update(
        &self,
        key: &str,
        value: Option<&str>,
        updated_by: Uuid,
    ) -> AppResult<SiteSetting> {
        sqlx::query_as::<_, SiteSetting>(
            r#"
            UPDATE site_settings
            SET setting_value = $2, updated_by = $3, updated_at = NOW()
            WHERE setting_key = $1
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setting '{}' not found", key)))
    }
}
