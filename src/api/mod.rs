//! HTTP API.

pub mod error;
pub mod orders;
pub mod products;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::checkout::Checkout;
use crate::store::MemStore;

pub use error::{ApiError, ApiResult};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<MemStore>,
    pub checkout: Checkout,
}

impl AppState {
    pub fn new(store: MemStore, checkout: Checkout) -> Self { Self { store: Arc::new(store), checkout } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront"})) }))
        .route("/api/v1/products", get(products::list_products).post(products::create_product))
        .route("/api/v1/products/:id", get(products::get_product).patch(products::update_product).delete(products::delete_product))
        .route("/api/v1/categories", get(products::list_categories))
        .route("/api/v1/orders", get(orders::list_orders).post(orders::create_order))
        .route("/api/v1/orders/:id", get(orders::get_order))
        .route("/api/v1/orders/:id/status", patch(orders::update_order_status))
        .route("/api/v1/orders/:id/tracking", get(orders::get_tracking))
        .route("/api/v1/checkout", post(orders::checkout))
        .route("/api/v1/admin/products", get(products::admin_products))
        .route("/api/v1/admin/stats", get(orders::dashboard_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
