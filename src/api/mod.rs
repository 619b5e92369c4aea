/// API routes and handlers
pub mod admin;
pub mod middleware;
pub mod owners;
pub mod pets;
pub mod reports;
pub mod sessions;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(pets::routes())
        .merge(owners::routes())
        .merge(reports::routes())
        .merge(sessions::routes())
        .merge(admin::routes())
}
