//! Equipment repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentDetails, EquipmentQuery, EquipmentStatus,
        UpdateEquipment,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT e.*, c.name AS category_name, c.color AS category_color,
           u.full_name AS created_by_name
    FROM equipment e
    LEFT JOIN equipment_categories c ON e.category_id = c.id
    LEFT JOIN users u ON e.created_by = u.id
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with optional category/status/search filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 0;

        if query.category.is_some() {
            idx += 1;
            conditions.push(format!("e.category_id = ${}", idx));
        }
        if query.status.is_some() {
            idx += 1;
            conditions.push(format!("e.status = ${}", idx));
        }
        if query.search.is_some() {
            idx += 1;
            conditions.push(format!(
                "(e.name ILIKE ${0} OR e.model_number ILIKE ${0} OR e.serial_number ILIKE ${0})",
                idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("{} {} ORDER BY e.created_at DESC", DETAILS_SELECT, where_clause);

        let mut builder = sqlx::query_as::<_, EquipmentDetails>(&sql);
        if let Some(category) = query.category {
            builder = builder.bind(category);
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(ref search) = query.search {
            builder = builder.bind(format!("%{}%", search));
        }

        let equipment = builder.fetch_all(&self.pool).await?;
        Ok(equipment)
    }

    /// Get equipment with category and creator names
    pub async fn get_details(&self, id: Uuid) -> AppResult<EquipmentDetails> {
        let sql = format!("{} WHERE e.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, EquipmentDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment, created_by: Uuid) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, category_id, location, model_number, serial_number,
                purchase_year, purchase_cost, status, operating_notes,
                is_bookable, requires_approval, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category_id)
        .bind(&data.location)
        .bind(&data.model_number)
        .bind(&data.serial_number)
        .bind(data.purchase_year)
        .bind(data.purchase_cost)
        .bind(data.status.unwrap_or(EquipmentStatus::Active))
        .bind(&data.operating_notes)
        .bind(data.is_bookable.unwrap_or(true))
        .bind(data.requires_approval.unwrap_or(false))
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::map_unique_violation(e, "Serial number already exists"))
    }

    /// Update equipment (full replacement)
    pub async fn update(&self, id: Uuid, data: &UpdateEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET name = $2, category_id = $3, location = $4, model_number = $5,
                serial_number = $6, purchase_year = $7, purchase_cost = $8,
                status = $9, operating_notes = $10, is_bookable = $11,
                requires_approval = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.category_id)
        .bind(&data.location)
        .bind(&data.model_number)
        .bind(&data.serial_number)
        .bind(data.purchase_year)
        .bind(data.purchase_cost)
        .bind(data.status.unwrap_or(EquipmentStatus::Active))
        .bind(&data.operating_notes)
        .bind(data.is_bookable.unwrap_or(true))
        .bind(data.requires_approval.unwrap_or(false))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| super::map_unique_violation(e, "Serial number already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Count equipment per status (for the dashboard)
    pub async fn count_by_status(&self) -> AppResult<Vec<(EquipmentStatus, i64)>> {
        let counts = sqlx::query_as::<_, (EquipmentStatus, i64)>(
            "SELECT status, COUNT(*) FROM equipment GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    /// Count equipment referencing a category
    pub async fn count_in_category(&self, category_id: Uuid) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
