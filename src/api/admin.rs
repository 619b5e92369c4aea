/// Admin console endpoints
///
/// Every route requires a valid admin-scoped bearer token via
/// `AdminAuthContext`.
use crate::{
    auth::AdminAuthContext,
    context::AppContext,
    error::{ApiError, ApiResult},
    models::{
        Admin, NewAdmin, NewOwner, NewPet, NewProduct, Owner, OwnerPatch, Pet, PetPatch, Product,
        ProductPatch, Report, ReportPatch, ReportStatus,
    },
    validation,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

/// Build admin routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/api/admin/dashboard", get(dashboard))
        // Pets
        .route("/api/admin/pets", get(list_pets).post(create_pet))
        .route("/api/admin/pets/:id", put(update_pet).delete(delete_pet))
        // Owners
        .route("/api/admin/owners", get(list_owners).post(create_owner))
        .route("/api/admin/owners/pending", get(list_pending_owners))
        .route(
            "/api/admin/owners/:id",
            put(update_owner).delete(delete_owner),
        )
        .route("/api/admin/owners/:id/approve", put(approve_owner))
        // Reports
        .route("/api/admin/reports", get(list_reports))
        .route("/api/admin/reports/:id", get(get_report).put(update_report))
        // Admins
        .route("/api/admin/admins", get(list_admins).post(create_admin))
        // Products
        .route("/api/admin/products", get(list_products).post(create_product))
        .route(
            "/api/admin/products/:id",
            put(update_product).delete(delete_product),
        )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardStats {
    pets: usize,
    adoptable_pets: usize,
    showcase_pets: usize,
    owners: usize,
    pending_owners: usize,
    reports: usize,
    open_reports: usize,
    products: usize,
}

/// Moderation dashboard counts
async fn dashboard(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
) -> ApiResult<Json<DashboardStats>> {
    let pets = ctx.storage.list_pets().await?;
    let adoptable = pets.iter().filter(|p| p.is_adoptable).count();
    let owners = ctx.storage.list_owners().await?;
    let pending = ctx.storage.list_pending_owners().await?;
    let reports = ctx.storage.list_reports().await?;
    let open_reports = reports
        .iter()
        .filter(|r| {
            matches!(
                r.status,
                ReportStatus::Submitted | ReportStatus::Investigating
            )
        })
        .count();
    let products = ctx.storage.list_products().await?;

    Ok(Json(DashboardStats {
        pets: pets.len(),
        adoptable_pets: adoptable,
        showcase_pets: pets.len() - adoptable,
        owners: owners.len(),
        pending_owners: pending.len(),
        reports: reports.len(),
        open_reports,
        products: products.len(),
    }))
}

// Pets

async fn list_pets(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
) -> ApiResult<Json<Vec<Pet>>> {
    Ok(Json(ctx.storage.list_pets().await?))
}

async fn create_pet(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Json(payload): Json<NewPet>,
) -> ApiResult<(StatusCode, Json<Pet>)> {
    validation::validate_new_pet(&payload)
        .map_err(validation::validation_errors_to_api_error)?;

    let pet = ctx.storage.create_pet(payload).await?;
    info!("Admin {} created pet {}", auth.admin.username, pet.id);

    Ok((StatusCode::CREATED, Json(pet)))
}

async fn update_pet(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
    Path(id): Path<i64>,
    Json(patch): Json<PetPatch>,
) -> ApiResult<Json<Pet>> {
    let pet = ctx
        .storage
        .update_pet(id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pet not found".to_string()))?;

    Ok(Json(pet))
}

async fn delete_pet(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if !ctx.storage.delete_pet(id).await? {
        return Err(ApiError::NotFound("Pet not found".to_string()));
    }

    info!("Admin {} deleted pet {}", auth.admin.username, id);
    Ok(Json(serde_json::json!({})))
}

// Owners

async fn list_owners(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
) -> ApiResult<Json<Vec<Owner>>> {
    Ok(Json(ctx.storage.list_owners().await?))
}

async fn list_pending_owners(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
) -> ApiResult<Json<Vec<Owner>>> {
    Ok(Json(ctx.storage.list_pending_owners().await?))
}

/// Admin-created owners go through the same registration path and start
/// unapproved
async fn create_owner(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Json(payload): Json<NewOwner>,
) -> ApiResult<(StatusCode, Json<Owner>)> {
    validation::validate_new_owner(&payload)
        .map_err(validation::validation_errors_to_api_error)?;

    let owner = ctx.storage.register_owner(payload).await?;
    info!("Admin {} created owner {}", auth.admin.username, owner.id);

    Ok((StatusCode::CREATED, Json(owner)))
}

async fn update_owner(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
    Path(id): Path<i64>,
    Json(patch): Json<OwnerPatch>,
) -> ApiResult<Json<Owner>> {
    let owner = ctx
        .storage
        .update_owner(id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Owner not found".to_string()))?;

    Ok(Json(owner))
}

async fn approve_owner(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Path(id): Path<i64>,
) -> ApiResult<Json<Owner>> {
    let owner = ctx
        .storage
        .approve_owner(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Owner not found".to_string()))?;

    info!("Admin {} approved owner {}", auth.admin.username, id);
    Ok(Json(owner))
}

async fn delete_owner(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if !ctx.storage.delete_owner(id).await? {
        return Err(ApiError::NotFound("Owner not found".to_string()));
    }

    info!("Admin {} deleted owner {}", auth.admin.username, id);
    Ok(Json(serde_json::json!({})))
}

// Reports

async fn list_reports(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
) -> ApiResult<Json<Vec<Report>>> {
    Ok(Json(ctx.storage.list_reports().await?))
}

async fn get_report(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
    Path(id): Path<i64>,
) -> ApiResult<Json<Report>> {
    let report = ctx
        .storage
        .get_report(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    Ok(Json(report))
}

async fn update_report(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Path(id): Path<i64>,
    Json(patch): Json<ReportPatch>,
) -> ApiResult<Json<Report>> {
    let report = ctx
        .storage
        .update_report(id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    info!(
        "Admin {} updated report {} to {}",
        auth.admin.username,
        id,
        report.status.as_str()
    );
    Ok(Json(report))
}

// Admins

async fn list_admins(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
) -> ApiResult<Json<Vec<Admin>>> {
    Ok(Json(ctx.storage.list_admins().await?))
}

async fn create_admin(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Json(payload): Json<NewAdmin>,
) -> ApiResult<(StatusCode, Json<Admin>)> {
    validation::validate_new_admin(&payload)
        .map_err(validation::validation_errors_to_api_error)?;

    let admin = ctx.storage.create_admin(payload).await?;
    info!(
        "Admin {} created admin {}",
        auth.admin.username, admin.username
    );

    Ok((StatusCode::CREATED, Json(admin)))
}

// Products

async fn list_products(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(ctx.storage.list_products().await?))
}

async fn create_product(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Json(payload): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    validation::validate_new_product(&payload)
        .map_err(validation::validation_errors_to_api_error)?;

    let product = ctx.storage.create_product(payload).await?;
    info!(
        "Admin {} created product {}",
        auth.admin.username, product.id
    );

    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(ctx): State<AppContext>,
    _auth: AdminAuthContext,
    Path(id): Path<i64>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<Product>> {
    let product = ctx
        .storage
        .update_product(id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

async fn delete_product(
    State(ctx): State<AppContext>,
    auth: AdminAuthContext,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if !ctx.storage.delete_product(id).await? {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    info!("Admin {} deleted product {}", auth.admin.username, id);
    Ok(Json(serde_json::json!({})))
}
