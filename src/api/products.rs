//! Product and category handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{ApiError, ApiResult, AppState};
use crate::catalog::{AdminFilter, ProductQuery};
use crate::domain::aggregates::{NewProduct, Product, ProductError, ProductPatch};

pub async fn list_products(State(s): State<AppState>, Query(q): Query<ProductQuery>) -> Json<Vec<Product>> {
    let products = s.store.list_products().await;
    Json(q.apply(&products))
}

pub async fn get_product(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Product>> {
    s.store.get_product(&id).await.map(Json).ok_or(ApiError::NotFound("Product"))
}

pub async fn create_product(State(s): State<AppState>, Json(r): Json<NewProduct>) -> ApiResult<(StatusCode, Json<Product>)> {
    r.validate()?;
    Ok((StatusCode::CREATED, Json(s.store.create_product(r).await)))
}

pub async fn update_product(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<ProductPatch>) -> ApiResult<Json<Product>> {
    if let Some(price) = r.price.as_ref().filter(|p| !p.is_valid()) {
        return Err(ProductError::InvalidPrice(price.to_string()).into());
    }
    s.store.update_product(&id, r).await.map(Json).ok_or(ApiError::NotFound("Product"))
}

pub async fn delete_product(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    if s.store.delete_product(&id).await { Ok(StatusCode::NO_CONTENT) } else { Err(ApiError::NotFound("Product")) }
}

pub async fn list_categories(State(s): State<AppState>) -> Json<Vec<String>> {
    Json(s.store.categories().await)
}

/// Admin table: includes inactive products.
pub async fn admin_products(State(s): State<AppState>, Query(f): Query<AdminFilter>) -> Json<Vec<Product>> {
    Json(f.apply(&s.store.all_products().await))
}
