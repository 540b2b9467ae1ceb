//! Domain events
use crate::domain::aggregates::OrderStatus;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "aggregate", rename_all = "lowercase")]
pub enum DomainEvent {
    Product(ProductEvent),
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductEvent {
    Created { product_id: String, name: String },
    Updated { product_id: String },
    Deleted { product_id: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    Placed { order_id: String, customer_email: String, total: String },
    StatusChanged { order_id: String, from: OrderStatus, to: OrderStatus },
}

impl DomainEvent {
    /// NATS subject the event is published on.
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Product(ProductEvent::Created { .. }) => "storefront.products.created",
            Self::Product(ProductEvent::Updated { .. }) => "storefront.products.updated",
            Self::Product(ProductEvent::Deleted { .. }) => "storefront.products.deleted",
            Self::Order(OrderEvent::Placed { .. }) => "storefront.orders.placed",
            Self::Order(OrderEvent::StatusChanged { .. }) => "storefront.orders.status_changed",
        }
    }
}
