/// Public pet browsing endpoints
use crate::{
    context::AppContext,
    error::{ApiError, ApiResult},
    models::Pet,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// Build pet routes
///
/// `/api/pets/showcase` is registered alongside `/api/pets/:id`; the
/// static segment wins, so the showcase feed is never shadowed by the
/// id lookup.
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/pets", get(list_adoptable))
        .route("/api/pets/showcase", get(list_showcase))
        .route("/api/pets/:id", get(get_pet))
}

/// Adoptable pets for the browse listing
async fn list_adoptable(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<Pet>>> {
    let pets = ctx.storage.list_adoptable_pets().await?;
    Ok(Json(pets))
}

/// Non-adoptable pets for the showcase feed
async fn list_showcase(State(ctx): State<AppContext>) -> ApiResult<Json<Vec<Pet>>> {
    let pets = ctx.storage.list_showcase_pets().await?;
    Ok(Json(pets))
}

async fn get_pet(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Pet>> {
    let pet = ctx
        .storage
        .get_pet(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pet not found".to_string()))?;

    Ok(Json(pet))
}
