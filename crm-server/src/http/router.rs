use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::http::handlers::{get_customer, import_customers, list_customers, patch_customer};
use crate::http::state::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/customers", get(list_customers))
        .route("/api/customers/import", post(import_customers))
        .route("/api/customers/:id", get(get_customer).patch(patch_customer))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
