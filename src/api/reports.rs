/// Public cruelty report submission
use crate::{
    context::AppContext,
    error::ApiResult,
    models::{NewReport, Report},
    validation,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::info;

/// Build report routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/api/reports", post(submit_report))
}

/// Submit a cruelty report
///
/// Stored in "submitted" state; anonymous submissions never keep the
/// contact details.
async fn submit_report(
    State(ctx): State<AppContext>,
    Json(payload): Json<NewReport>,
) -> ApiResult<(StatusCode, Json<Report>)> {
    validation::validate_report(&payload)
        .map_err(validation::validation_errors_to_api_error)?;

    let report = ctx.storage.create_report(payload).await?;
    info!("Cruelty report {} submitted", report.id);

    Ok((StatusCode::CREATED, Json(report)))
}
