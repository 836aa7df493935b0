//! Maintenance history model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Kind of maintenance performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "maintenance_type", rename_all = "lowercase")]
pub enum MaintenanceType {
    Routine,
    Repair,
    Calibration,
    Inspection,
    Other,
}

/// Maintenance record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub performed_by: Option<Uuid>,
    pub performed_date: DateTime<Utc>,
    pub cost: Option<f64>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Maintenance record joined with equipment and technician names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceDetails {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub performed_by: Option<Uuid>,
    pub performed_date: DateTime<Utc>,
    pub cost: Option<f64>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub equipment_name: String,
    pub performed_by_name: Option<String>,
}

/// Create maintenance record request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    pub equipment_id: Uuid,
    pub maintenance_type: MaintenanceType,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub performed_date: DateTime<Utc>,
    pub cost: Option<f64>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Update maintenance record request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenance {
    pub maintenance_type: MaintenanceType,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub performed_date: DateTime<Utc>,
    pub cost: Option<f64>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Maintenance list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MaintenanceQuery {
    pub equipment_id: Option<Uuid>,
    pub maintenance_type: Option<MaintenanceType>,
    /// Only records performed at or after this instant
    pub start_date: Option<DateTime<Utc>>,
    /// Only records performed at or before this instant
    pub end_date: Option<DateTime<Utc>>,
}
