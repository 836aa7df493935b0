//! Equipment remarks (issue log) repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::remark::{CreateRemark, Remark, RemarkDetails, RemarkQuery},
};

const DETAILS_SELECT: &str = r#"
    SELECT r.*, e.name AS equipment_name,
           u1.full_name AS reported_by_name,
           u2.full_name AS resolved_by_name
    FROM equipment_remarks r
    JOIN equipment e ON r.equipment_id = e.id
    LEFT JOIN users u1 ON r.reported_by = u1.id
    LEFT JOIN users u2 ON r.resolved_by = u2.id
"#;

#[derive(Clone)]
pub struct RemarksRepository {
    pool: Pool<Postgres>,
}

impl RemarksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List remarks with optional filters
    pub async fn list(&self, query: &RemarkQuery) -> AppResult<Vec<RemarkDetails>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 0;

        if query.equipment_id.is_some() {
            idx += 1;
            conditions.push(format!("r.equipment_id = ${}", idx));
        }
        if query.remark_type.is_some() {
            idx += 1;
            conditions.push(format!("r.remark_type = ${}", idx));
        }
        if query.resolved.is_some() {
            idx += 1;
            conditions.push(format!("r.resolved = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("{} {} ORDER BY r.created_at DESC", DETAILS_SELECT, where_clause);

        let mut builder = sqlx::query_as::<_, RemarkDetails>(&sql);
        if let Some(equipment_id) = query.equipment_id {
            builder = builder.bind(equipment_id);
        }
        if let Some(remark_type) = query.remark_type {
            builder = builder.bind(remark_type);
        }
        if let Some(resolved) = query.resolved {
            builder = builder.bind(resolved);
        }

        let remarks = builder.fetch_all(&self.pool).await?;
        Ok(remarks)
    }

    /// Remarks for one piece of equipment, newest first
    pub async fn for_equipment(&self, equipment_id: Uuid) -> AppResult<Vec<RemarkDetails>> {
        let sql = format!(
            "{} WHERE r.equipment_id = $1 ORDER BY r.created_at DESC",
            DETAILS_SELECT
        );
        let remarks = sqlx::query_as::<_, RemarkDetails>(&sql)
            .bind(equipment_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(remarks)
    }

    /// Create a remark
    pub async fn create(&self, data: &CreateRemark, reported_by: Uuid) -> AppResult<Remark> {
        let remark = sqlx::query_as::<_, Remark>(
            r#"
            INSERT INTO equipment_remarks (
                equipment_id, remark_type, description, severity, reported_by
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.remark_type)
        .bind(&data.description)
        .bind(data.severity)
        .bind(reported_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(remark)
    }

    /// Mark a remark as resolved
    pub async fn resolve(&self, id: Uuid, resolved_by: Uuid) -> AppResult<Remark> {
        sqlx::query_as::<_, Remark>(
            r#"
            UPDATE equipment_remarks
            SET resolved = TRUE, resolved_by = $2, resolved_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(resolved_by)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Remark {} not found", id)))
    }

    /// Delete a remark
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_remarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Remark {} not found", id)));
        }
        Ok(())
    }

    /// Count unresolved remarks (for the dashboard)
    pub async fn count_unresolved(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment_remarks WHERE resolved = FALSE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
