/// Login and registration endpoints
///
/// Successful logins return a signed, expiring bearer token plus the
/// authenticated principal. Bad credentials are a 401 with a message
/// that does not reveal which half was wrong.
use crate::{
    auth,
    context::AppContext,
    error::{ApiError, ApiResult},
    models::{Admin, NewOwner, Owner},
    validation,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Build login/registration routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/owner/login", post(owner_login))
        .route("/api/register/owners", post(register_owner))
        .route("/api/admin/login", post(admin_login))
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub admin: Admin,
}

#[derive(Debug, Deserialize)]
pub struct OwnerLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerLoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub owner: Owner,
}

/// Admin console login
async fn admin_login(
    State(ctx): State<AppContext>,
    Json(payload): Json<AdminLoginRequest>,
) -> ApiResult<Json<AdminLoginResponse>> {
    let admin = ctx
        .storage
        .validate_admin_login(&payload.username, &payload.password)
        .await?
        .ok_or_else(|| ApiError::Authentication("Invalid username or password".to_string()))?;

    let ttl = ctx.config.auth.token_ttl_minutes;
    let token = auth::issue_token(
        &admin.username,
        auth::SCOPE_ADMIN,
        ttl,
        &ctx.config.auth.jwt_secret,
    )?;

    info!("Admin {} logged in", admin.username);

    Ok(Json(AdminLoginResponse {
        token,
        expires_in: ttl * 60,
        admin,
    }))
}

/// Owner login
async fn owner_login(
    State(ctx): State<AppContext>,
    Json(payload): Json<OwnerLoginRequest>,
) -> ApiResult<Json<OwnerLoginResponse>> {
    let owner = ctx
        .storage
        .validate_owner_login(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| ApiError::Authentication("Invalid email or password".to_string()))?;

    let ttl = ctx.config.auth.token_ttl_minutes;
    let token = auth::issue_token(
        &owner.email,
        auth::SCOPE_OWNER,
        ttl,
        &ctx.config.auth.jwt_secret,
    )?;

    info!("Owner {} logged in", owner.id);

    Ok(Json(OwnerLoginResponse {
        token,
        expires_in: ttl * 60,
        owner,
    }))
}

/// Owner self-registration; the account starts unapproved
async fn register_owner(
    State(ctx): State<AppContext>,
    Json(payload): Json<NewOwner>,
) -> ApiResult<(StatusCode, Json<Owner>)> {
    validation::validate_new_owner(&payload)
        .map_err(validation::validation_errors_to_api_error)?;

    let owner = ctx.storage.register_owner(payload).await?;
    info!("Owner {} registered, pending approval", owner.id);

    Ok((StatusCode::CREATED, Json(owner)))
}
