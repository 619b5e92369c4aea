/// Public owner directory endpoints
use crate::{
    context::AppContext,
    error::{ApiError, ApiResult},
    models::Owner,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// Build owner directory routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/owners", get(list_owners))
        .route("/api/owners/:id", get(get_owner))
}

async fn list_owners(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<Owner>>> {
    let owners = ctx.storage.list_owners().await?;
    Ok(Json(owners))
}

async fn get_owner(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Owner>> {
    let owner = ctx
        .storage
        .get_owner(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Owner not found".to_string()))?;

    Ok(Json(owner))
}
