//! Site settings endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::setting::{SiteSetting, UpdateSetting},
};

use super::AuthenticatedUser;

/// List all settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Settings", body = Vec<SiteSetting>)
    )
)]
pub async fn list_settings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SiteSetting>>> {
    let settings = state.services.settings.list().await?;
    Ok(Json(settings))
}

/// Get one setting by key
#[utoipa::path(
    get,
    path = "/settings/{key}",
    tag = "settings",
    security(("bearer_auth" = [])),
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting", body = SiteSetting),
        (status = 404, description = "Setting not found")
    )
)]
pub async fn get_setting(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(key): Path<String>,
) -> AppResult<Json<SiteSetting>> {
    let setting = state.services.settings.get(&key).await?;
    Ok(Json(setting))
}

/// Update a setting's value (admin only)
#[utoipa::path(
    put,
    path = "/settings/{key}",
    tag = "settings",
    security(("bearer_auth" = [])),
    params(("key" = String, Path, description = "Setting key")),
    request_body = UpdateSetting,
    responses(
        (status = 200, description = "Setting updated", body = SiteSetting),
        (status = 404, description = "Setting not found")
    )
)]
pub async fn update_setting(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(key): Path<String>,
    Json(request): Json<UpdateSetting>,
) -> AppResult<Json<SiteSetting>> {
    claims.require_admin()?;
    let setting = state
        .services
        .settings
        .update(&key, request.setting_value.as_deref(), claims.user_id)
        .await?;
    Ok(Json(setting))
}
