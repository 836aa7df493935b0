//! Dashboard statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct EquipmentStats {
    pub total: i64,
    pub active: i64,
    pub under_maintenance: i64,
    pub decommissioned: i64,
    pub reserved: i64,
}

#[derive(Serialize, ToSchema)]
pub struct BookingStats {
    pub pending_approval: i64,
    pub upcoming_confirmed: i64,
}

#[derive(Serialize, ToSchema)]
pub struct RemarkStats {
    pub unresolved: i64,
}

#[derive(Serialize, ToSchema)]
pub struct UserStats {
    pub pending_approval: i64,
}

/// Aggregated dashboard statistics
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub equipment: EquipmentStats,
    pub bookings: BookingStats,
    pub remarks: RemarkStats,
    pub users: UserStats,
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<StatsResponse>> {
    let counts = state.services.stats.dashboard().await?;

    Ok(Json(StatsResponse {
        equipment: EquipmentStats {
            total: counts.equipment_total,
            active: counts.equipment_active,
            under_maintenance: counts.equipment_under_maintenance,
            decommissioned: counts.equipment_decommissioned,
            reserved: counts.equipment_reserved,
        },
        bookings: BookingStats {
            pending_approval: counts.bookings_pending_approval,
            upcoming_confirmed: counts.bookings_upcoming_confirmed,
        },
        remarks: RemarkStats {
            unresolved: counts.remarks_unresolved,
        },
        users: UserStats {
            pending_approval: counts.users_pending_approval,
        },
    }))
}
