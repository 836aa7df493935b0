//! Site settings model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Site setting key/value record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SiteSetting {
    pub id: Uuid,
    pub setting_key: String,
    pub setting_value: Option<String>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

/// Update setting request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSetting {
    pub setting_value: Option<String>,
}
