//! Maintenance history repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::maintenance::{
        CreateMaintenance, MaintenanceDetails, MaintenanceQuery, MaintenanceRecord,
        UpdateMaintenance,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT m.*, e.name AS equipment_name, u.full_name AS performed_by_name
    FROM maintenance_history m
    JOIN equipment e ON m.equipment_id = e.id
    LEFT JOIN users u ON m.performed_by = u.id
"#;

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List maintenance records with optional filters
    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<Vec<MaintenanceDetails>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 0;

        if query.equipment_id.is_some() {
            idx += 1;
            conditions.push(format!("m.equipment_id = ${}", idx));
        }
        if query.maintenance_type.is_some() {
            idx += 1;
            conditions.push(format!("m.maintenance_type = ${}", idx));
        }
        if query.start_date.is_some() {
            idx += 1;
            conditions.push(format!("m.performed_date >= ${}", idx));
        }
        if query.end_date.is_some() {
            idx += 1;
            conditions.push(format!("m.performed_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY m.performed_date DESC",
            DETAILS_SELECT, where_clause
        );

        let mut builder = sqlx::query_as::<_, MaintenanceDetails>(&sql);
        if let Some(equipment_id) = query.equipment_id {
            builder = builder.bind(equipment_id);
        }
        if let Some(maintenance_type) = query.maintenance_type {
            builder = builder.bind(maintenance_type);
        }
        if let Some(start_date) = query.start_date {
            builder = builder.bind(start_date);
        }
        if let Some(end_date) = query.end_date {
            builder = builder.bind(end_date);
        }

        let records = builder.fetch_all(&self.pool).await?;
        Ok(records)
    }

    /// Maintenance history for one piece of equipment, newest first
    pub async fn for_equipment(&self, equipment_id: Uuid) -> AppResult<Vec<MaintenanceDetails>> {
        let sql = format!(
            "{} WHERE m.equipment_id = $1 ORDER BY m.performed_date DESC",
            DETAILS_SELECT
        );
        let records = sqlx::query_as::<_, MaintenanceDetails>(&sql)
            .bind(equipment_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    /// Create a maintenance record
    pub async fn create(
        &self,
        data: &CreateMaintenance,
        performed_by: Uuid,
    ) -> AppResult<MaintenanceRecord> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_history (
                equipment_id, maintenance_type, description, performed_by,
                performed_date, cost, next_maintenance_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.maintenance_type)
        .bind(&data.description)
        .bind(performed_by)
        .bind(data.performed_date)
        .bind(data.cost)
        .bind(data.next_maintenance_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    /// Update a maintenance record
    pub async fn update(&self, id: Uuid, data: &UpdateMaintenance) -> AppResult<MaintenanceRecord> {
        sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_history
            SET maintenance_type = $2, description = $3, performed_date = $4,
                cost = $5, next_maintenance_date = $6, notes = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.maintenance_type)
        .bind(&data.description)
        .bind(data.performed_date)
        .bind(data.cost)
        .bind(data.next_maintenance_date)
        .bind(&data.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance record {} not found", id)))
    }

    /// Delete a maintenance record
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Maintenance record {} not found",
                id
            )));
        }
        Ok(())
    }
}
