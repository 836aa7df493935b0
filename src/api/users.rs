//! User administration endpoints (approval workflow)

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, models::user::User};

use super::AuthenticatedUser;

/// Target user for an admin action
#[derive(Deserialize, ToSchema)]
pub struct UserIdRequest {
    pub user_id: Uuid,
}

/// Admin action response
#[derive(Serialize, ToSchema)]
pub struct UserActionResponse {
    pub message: String,
    pub user: User,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<User>>> {
    claims.require_admin()?;
    let users = state.services.users.list().await?;
    Ok(Json(users))
}

/// List users awaiting approval
#[utoipa::path(
    get,
    path = "/users/pending",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending users", body = Vec<User>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn pending_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<User>>> {
    claims.require_admin()?;
    let users = state.services.users.list_pending().await?;
    Ok(Json(users))
}

/// Approve a pending registration
#[utoipa::path(
    post,
    path = "/users/approve",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UserIdRequest,
    responses(
        (status = 200, description = "User approved", body = UserActionResponse),
        (status = 404, description = "User not found"),
        (status = 422, description = "User is already approved")
    )
)]
pub async fn approve_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UserIdRequest>,
) -> AppResult<Json<UserActionResponse>> {
    claims.require_admin()?;
    let user = state.services.users.approve(request.user_id, claims.user_id).await?;
    Ok(Json(UserActionResponse {
        message: "User approved successfully".to_string(),
        user,
    }))
}

/// Reject a registration
#[utoipa::path(
    post,
    path = "/users/reject",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UserIdRequest,
    responses(
        (status = 200, description = "User rejected", body = UserActionResponse),
        (status = 404, description = "User not found"),
        (status = 422, description = "User is already rejected")
    )
)]
pub async fn reject_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UserIdRequest>,
) -> AppResult<Json<UserActionResponse>> {
    claims.require_admin()?;
    let user = state.services.users.reject(request.user_id).await?;
    Ok(Json(UserActionResponse {
        message: "User rejected successfully".to_string(),
        user,
    }))
}

/// Promote an approved user to administrator
#[utoipa::path(
    post,
    path = "/users/promote",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UserIdRequest,
    responses(
        (status = 200, description = "User promoted", body = UserActionResponse),
        (status = 404, description = "User not found"),
        (status = 422, description = "User not approved or already an admin")
    )
)]
pub async fn promote_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UserIdRequest>,
) -> AppResult<Json<UserActionResponse>> {
    claims.require_admin()?;
    let user = state.services.users.promote(request.user_id).await?;
    Ok(Json(UserActionResponse {
        message: "User promoted to admin successfully".to_string(),
        user,
    }))
}

/// Demote an administrator to a regular user
#[utoipa::path(
    post,
    path = "/users/demote",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UserIdRequest,
    responses(
        (status = 200, description = "Admin demoted", body = UserActionResponse),
        (status = 400, description = "Self-demotion refused"),
        (status = 404, description = "User not found")
    )
)]
pub async fn demote_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UserIdRequest>,
) -> AppResult<Json<UserActionResponse>> {
    claims.require_admin()?;
    let user = state.services.users.demote(request.user_id, claims.user_id).await?;
    Ok(Json(UserActionResponse {
        message: "Admin demoted to user successfully".to_string(),
        user,
    }))
}

/// Deactivate an account
#[utoipa::path(
    post,
    path = "/users/deactivate",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UserIdRequest,
    responses(
        (status = 200, description = "User deactivated", body = UserActionResponse),
        (status = 400, description = "Self-deactivation refused"),
        (status = 404, description = "User not found")
    )
)]
pub async fn deactivate_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UserIdRequest>,
) -> AppResult<Json<UserActionResponse>> {
    claims.require_admin()?;
    let user = state.services.users.deactivate(request.user_id, claims.user_id).await?;
    Ok(Json(UserActionResponse {
        message: "User deactivated successfully".to_string(),
        user,
    }))
}

/// Reactivate an account
#[utoipa::path(
    post,
    path = "/users/activate",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UserIdRequest,
    responses(
        (status = 200, description = "User activated", body = UserActionResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn activate_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UserIdRequest>,
) -> AppResult<Json<UserActionResponse>> {
    claims.require_admin()?;
    let user = state.services.users.activate(request.user_id).await?;
    Ok(Json(UserActionResponse {
        message: "User activated successfully".to_string(),
        user,
    }))
}
