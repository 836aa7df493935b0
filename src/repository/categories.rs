//! Equipment categories repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::category::{CreateCategory, EquipmentCategory, UpdateCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all categories alphabetically
    pub async fn list(&self) -> AppResult<Vec<EquipmentCategory>> {
        let categories = sqlx::query_as::<_, EquipmentCategory>(
            "SELECT * FROM equipment_categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>(
            "SELECT * FROM equipment_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Create category
    pub async fn create(&self, data: &CreateCategory) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>(
            r#"
            INSERT INTO equipment_categories (name, description, color, icon)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.color)
        .bind(&data.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::map_unique_violation(e, "Category name already exists"))
    }

    /// Update category
    pub async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<EquipmentCategory> {
        sqlx::query_as::<_, EquipmentCategory>(
            r#"
            UPDATE equipment_categories
            SET name = $2, description = $3, color = $4, icon = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.color)
        .bind(&data.icon)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::map_unique_violation(e, "Category name already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete category
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}
