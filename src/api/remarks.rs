//! Equipment remark (issue log) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::remark::{CreateRemark, Remark, RemarkDetails, RemarkQuery},
};

use super::AuthenticatedUser;

/// List remarks with optional filters
#[utoipa::path(
    get,
    path = "/remarks",
    tag = "remarks",
    security(("bearer_auth" = [])),
    params(RemarkQuery),
    responses(
        (status = 200, description = "Remarks", body = Vec<RemarkDetails>)
    )
)]
pub async fn list_remarks(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RemarkQuery>,
) -> AppResult<Json<Vec<RemarkDetails>>> {
    let remarks = state.services.remarks.list(&query).await?;
    Ok(Json(remarks))
}

/// Report an issue against equipment
#[utoipa::path(
    post,
    path = "/remarks",
    tag = "remarks",
    security(("bearer_auth" = [])),
    request_body = CreateRemark,
    responses(
        (status = 201, description = "Remark created", body = Remark),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn create_remark(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateRemark>,
) -> AppResult<(StatusCode, Json<Remark>)> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let remark = state.services.remarks.create(&data, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(remark)))
}

/// Mark a remark as resolved (admin only)
#[utoipa::path(
    patch,
    path = "/remarks/{id}/resolve",
    tag = "remarks",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Remark ID")),
    responses(
        (status = 200, description = "Remark resolved", body = Remark),
        (status = 404, description = "Remark not found")
    )
)]
pub async fn resolve_remark(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Remark>> {
    claims.require_admin()?;
    let remark = state.services.remarks.resolve(id, claims.user_id).await?;
    Ok(Json(remark))
}

/// Delete a remark (admin only)
#[utoipa::path(
    delete,
    path = "/remarks/{id}",
    tag = "remarks",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Remark ID")),
    responses(
        (status = 204, description = "Remark deleted"),
        (status = 404, description = "Remark not found")
    )
)]
pub async fn delete_remark(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.remarks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
