//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, bookings, categories, equipment, health, maintenance, remarks, settings, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LabTrack API",
        version = "1.0.0",
        description = "Laboratory Equipment Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "LabTrack Team", email = "contact@labtrack.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        auth::change_password,
        // Users
        users::list_users,
        users::pending_users,
        users::approve_user,
        users::reject_user,
        users::promote_user,
        users::demote_user,
        users::deactivate_user,
        users::activate_user,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::equipment_maintenance,
        equipment::equipment_remarks,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking,
        bookings::update_booking_status,
        bookings::cancel_booking,
        bookings::delete_booking,
        bookings::equipment_availability,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::create_maintenance,
        maintenance::update_maintenance,
        maintenance::delete_maintenance,
        // Remarks
        remarks::list_remarks,
        remarks::create_remark,
        remarks::resolve_remark,
        remarks::delete_remark,
        // Settings
        settings::list_settings,
        settings::get_setting,
        settings::update_setting,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::RegisterRequest,
            auth::RegisterResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::ChangePasswordRequest,
            auth::MessageResponse,
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::ApprovalStatus,
            users::UserIdRequest,
            users::UserActionResponse,
            // Categories
            crate::models::category::EquipmentCategory,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentQuery,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingStatus,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBooking,
            crate::models::booking::UpdateBookingStatus,
            crate::models::booking::CancelBooking,
            crate::models::booking::BookingQuery,
            crate::models::booking::AvailabilityQuery,
            bookings::BookingResponse,
            bookings::CreateBookingResponse,
            // Maintenance
            crate::models::maintenance::MaintenanceRecord,
            crate::models::maintenance::MaintenanceDetails,
            crate::models::maintenance::MaintenanceType,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::UpdateMaintenance,
            crate::models::maintenance::MaintenanceQuery,
            // Remarks
            crate::models::remark::Remark,
            crate::models::remark::RemarkDetails,
            crate::models::remark::RemarkType,
            crate::models::remark::RemarkSeverity,
            crate::models::remark::CreateRemark,
            crate::models::remark::RemarkQuery,
            // Settings
            crate::models::setting::SiteSetting,
            crate::models::setting::UpdateSetting,
            // Stats
            stats::StatsResponse,
            stats::EquipmentStats,
            stats::BookingStats,
            stats::RemarkStats,
            stats::UserStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User approval workflow and administration"),
        (name = "categories", description = "Equipment categories"),
        (name = "equipment", description = "Equipment registry"),
        (name = "bookings", description = "Equipment bookings and availability"),
        (name = "maintenance", description = "Maintenance history"),
        (name = "remarks", description = "Equipment issue log"),
        (name = "settings", description = "Site settings"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
