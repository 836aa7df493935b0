//! Equipment remark (issue log) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Kind of reported remark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "remark_type", rename_all = "lowercase")]
pub enum RemarkType {
    Damage,
    Malfunction,
    Decommission,
    General,
    Issue,
}

/// Severity of a reported remark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "remark_severity", rename_all = "lowercase")]
pub enum RemarkSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Remark record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Remark {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub remark_type: RemarkType,
    pub description: String,
    pub severity: Option<RemarkSeverity>,
    pub reported_by: Option<Uuid>,
    pub resolved: bool,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Remark joined with equipment and user names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RemarkDetails {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub remark_type: RemarkType,
    pub description: String,
    pub severity: Option<RemarkSeverity>,
    pub reported_by: Option<Uuid>,
    pub resolved: bool,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub equipment_name: String,
    pub reported_by_name: Option<String>,
    pub resolved_by_name: Option<String>,
}

/// Create remark request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRemark {
    pub equipment_id: Uuid,
    pub remark_type: RemarkType,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub severity: Option<RemarkSeverity>,
}

/// Remark list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RemarkQuery {
    pub equipment_id: Option<Uuid>,
    pub remark_type: Option<RemarkType>,
    pub resolved: Option<bool>,
}
