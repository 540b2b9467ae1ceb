//! Order, tracking, checkout and dashboard handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult, AppState};
use crate::checkout::CheckoutForm;
use crate::dashboard::DashboardStats;
use crate::domain::aggregates::{CartItem, NewOrder, Order, OrderStatus};
use crate::domain::tracking::OrderTracking;

pub async fn list_orders(State(s): State<AppState>) -> Json<Vec<Order>> {
    Json(s.store.list_orders().await)
}

pub async fn get_order(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Order>> {
    s.store.get_order(&id).await.map(Json).ok_or(ApiError::NotFound("Order"))
}

pub async fn create_order(State(s): State<AppState>, Json(r): Json<NewOrder>) -> ApiResult<(StatusCode, Json<Order>)> {
    r.validate()?;
    Ok((StatusCode::CREATED, Json(s.store.create_order(r).await)))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate { pub status: String }

pub async fn update_order_status(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<StatusUpdate>) -> ApiResult<Json<Order>> {
    let status: OrderStatus = r.status.parse()?;
    s.store.update_order_status(&id, status).await?.map(Json).ok_or(ApiError::NotFound("Order"))
}

pub async fn get_tracking(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<OrderTracking>> {
    let order = s.store.get_order(&id).await.ok_or(ApiError::NotFound("Order"))?;
    Ok(Json(OrderTracking::for_order(&order)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub form: CheckoutForm,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order: Order,
    pub tracking_url: String,
}

/// The client clears its own cart once this returns 201.
pub async fn checkout(State(s): State<AppState>, Json(r): Json<CheckoutRequest>) -> ApiResult<(StatusCode, Json<CheckoutResponse>)> {
    let order = s.checkout.place_order(&r.form, &r.items, &s.store).await?;
    let tracking_url = format!("/api/v1/orders/{}/tracking", order.id);
    Ok((StatusCode::CREATED, Json(CheckoutResponse { order, tracking_url })))
}

pub async fn dashboard_stats(State(s): State<AppState>) -> Json<DashboardStats> {
    let products = s.store.list_products().await;
    let orders = s.store.list_orders().await;
    Json(DashboardStats::now(&products, &orders))
}
