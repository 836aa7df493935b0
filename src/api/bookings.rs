//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::booking::{
        AvailabilityQuery, Booking, BookingDetails, BookingQuery, CancelBooking, CreateBooking,
        UpdateBooking, UpdateBookingStatus,
    },
};

use super::{auth::MessageResponse, AuthenticatedUser};

/// Booking response with a status message
#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub message: String,
    pub booking: Booking,
}

/// Create booking response; tells the caller whether approval is pending
#[derive(Serialize, ToSchema)]
pub struct CreateBookingResponse {
    pub message: String,
    pub booking: Booking,
    pub requires_approval: bool,
}

/// List bookings (non-admin callers only see their own)
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings", body = Vec<BookingDetails>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.list(&claims, query).await?;
    Ok(Json(bookings))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking))
}

/// Create a booking for the calling user
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = CreateBookingResponse),
        (status = 400, description = "Equipment not bookable or unavailable, or invalid interval"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Time slot conflicts with existing booking")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<CreateBookingResponse>)> {
    let (booking, requires_approval) = state.services.bookings.create(&claims, request).await?;

    let message = if requires_approval {
        "Booking created successfully. Awaiting admin approval.".to_string()
    } else {
        "Booking created and confirmed successfully".to_string()
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            message,
            booking,
            requires_approval,
        }),
    ))
}

/// Reschedule a confirmed future booking (owner or admin)
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Time slot conflicts with existing booking"),
        (status = 422, description = "Booking not confirmed or already in the past")
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBooking>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.update(&claims, id, request).await?;
    Ok(Json(BookingResponse {
        message: "Booking updated successfully".to_string(),
        booking,
    }))
}

/// Admin status transition (confirm, reject, complete, cancel)
#[utoipa::path(
    patch,
    path = "/bookings/{id}/status",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingStatus,
    responses(
        (status = 200, description = "Status updated", body = BookingResponse),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Transition not permitted from current status")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatus>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.update_status(&claims, id, request).await?;
    Ok(Json(BookingResponse {
        message: "Booking status updated successfully".to_string(),
        booking,
    }))
}

/// Cancel a booking (owner or admin)
#[utoipa::path(
    patch,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = CancelBooking,
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking cannot be cancelled")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelBooking>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.cancel(&claims, id, request).await?;
    Ok(Json(BookingResponse {
        message: "Booking cancelled successfully".to_string(),
        booking,
    }))
}

/// Delete a future booking outright (owner or admin)
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Cannot delete past bookings")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.bookings.delete(&claims, id).await?;
    Ok(Json(MessageResponse {
        message: "Booking deleted successfully".to_string(),
    }))
}

/// Confirmed bookings for a piece of equipment within a date range
#[utoipa::path(
    get,
    path = "/bookings/equipment/{equipment_id}/availability",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("equipment_id" = Uuid, Path, description = "Equipment ID"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Confirmed bookings in range", body = Vec<Booking>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn equipment_availability(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(equipment_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state
        .services
        .bookings
        .availability(equipment_id, query.start_date, query.end_date)
        .await?;
    Ok(Json(bookings))
}
