//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Operational status of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "equipment_status", rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    UnderMaintenance,
    Decommissioned,
    Reserved,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "active",
            EquipmentStatus::UnderMaintenance => "under_maintenance",
            EquipmentStatus::Decommissioned => "decommissioned",
            EquipmentStatus::Reserved => "reserved",
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub location: Option<String>,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_year: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub status: EquipmentStatus,
    pub operating_notes: Option<String>,
    /// Whether the equipment can be reserved via bookings
    pub is_bookable: bool,
    /// Whether new bookings start as `pending` until an admin confirms them
    pub requires_approval: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipment joined with category and creator names for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentDetails {
    pub id: Uuid,
    pub name: String,
    pub category_id: Option<Uuid>,
    pub location: Option<String>,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_year: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub status: EquipmentStatus,
    pub operating_notes: Option<String>,
    pub is_bookable: bool,
    pub requires_approval: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub created_by_name: Option<String>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Equipment name is required"))]
    pub name: String,
    pub category_id: Option<Uuid>,
    pub location: Option<String>,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_year: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub status: Option<EquipmentStatus>,
    pub operating_notes: Option<String>,
    pub is_bookable: Option<bool>,
    pub requires_approval: Option<bool>,
}

/// Update equipment request (full replacement, PUT semantics)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Equipment name is required"))]
    pub name: String,
    pub category_id: Option<Uuid>,
    pub location: Option<String>,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_year: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub status: Option<EquipmentStatus>,
    pub operating_notes: Option<String>,
    pub is_bookable: Option<bool>,
    pub requires_approval: Option<bool>,
}

/// Equipment list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Filter by category id
    pub category: Option<Uuid>,
    /// Filter by status
    pub status: Option<EquipmentStatus>,
    /// Case-insensitive search over name, model and serial number
    pub search: Option<String>,
}

/// Booking-relevant flags read from the equipment registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct BookingFlags {
    pub is_bookable: bool,
    pub status: EquipmentStatus,
    pub requires_approval: bool,
}
