//! Order Aggregate

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use crate::domain::value_objects::Price;

/// Days between placing an order and its estimated delivery.
pub const DELIVERY_ESTIMATE_DAYS: i64 = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub status: OrderStatus,
    pub total: Price,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

/// Product fields copied into the order when it is placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem { pub product_id: String, pub name: String, pub price: Price, pub quantity: u32 }

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress { pub name: String, pub address: String, pub city: String, pub state: String, pub zip_code: String, pub country: String }

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    pub total: Price,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
}

impl NewOrder {
    /// Rejects orders with no lines, zero-quantity lines or out-of-range prices.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.items.is_empty() { return Err(OrderError::NoItems); }
        if !self.total.is_valid() { return Err(OrderError::InvalidTotal(self.total.to_string())); }
        if let Some(item) = self.items.iter().find(|i| i.quantity == 0 || !i.price.is_valid()) {
            return Err(OrderError::InvalidItem(item.product_id.clone()));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus { #[default] Pending, Confirmed, Processing, Shipped, Delivered, Cancelled }

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [Self::Pending, Self::Confirmed, Self::Processing, Self::Shipped, Self::Delivered, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending", Self::Confirmed => "confirmed", Self::Processing => "processing",
            Self::Shipped => "shipped", Self::Delivered => "delivered", Self::Cancelled => "cancelled",
        }
    }

    /// Statuses reachable in one step from `self`.
    pub fn successors(&self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Processing, Self::Cancelled],
            Self::Confirmed => &[Self::Processing, Self::Cancelled],
            Self::Processing => &[Self::Shipped, Self::Cancelled],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    /// Re-applying the current status is allowed and changes nothing.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        *self == next || self.successors().contains(&next)
    }

    pub fn is_terminal(&self) -> bool { self.successors().is_empty() }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for OrderStatus {
    type Err = OrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|st| st.as_str() == needle).ok_or(OrderError::UnknownStatus(s.to_string()))
    }
}

impl Order {
    pub fn create(new: NewOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            status: new.status.unwrap_or_default(),
            total: new.total,
            items: new.items,
            shipping_address: new.shipping_address,
            created_at: now,
            estimated_delivery: now + Duration::days(DELIVERY_ESTIMATE_DAYS),
        }
    }

    /// Moves the order along the status table, returning the previous status.
    pub fn transition(&mut self, next: OrderStatus) -> Result<OrderStatus, OrderError> {
        let from = self.status;
        if !from.can_transition_to(next) { return Err(OrderError::InvalidTransition { from, to: next }); }
        self.status = next;
        Ok(from)
    }

    pub fn item_count(&self) -> u32 { self.items.iter().fold(0, |n, i| n.saturating_add(i.quantity)) }

    pub fn total_amount(&self) -> Decimal { self.total.amount() }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Order has no items")]
    NoItems,
    #[error("Invalid order total: {0}")]
    InvalidTotal(String),
    #[error("Invalid order line: {0}")]
    InvalidItem(String),
}

#[cfg(test)]
pub(crate) fn sample(email: &str, total: &str) -> NewOrder {
    NewOrder {
        customer_name: "Ada Lovelace".into(), customer_email: email.into(), status: None, total: Price::new(total),
        items: vec![OrderItem { product_id: "P1".into(), name: "Widget".into(), price: Price::new("10.00"), quantity: 2 }],
        shipping_address: ShippingAddress { name: "Ada Lovelace".into(), address: "1 Analytical Way".into(), city: "London".into(), state: "LDN".into(), zip_code: "N1".into(), country: "United Kingdom".into() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_create() {
        let order = Order::create(sample("ada@example.com", "35.99"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.estimated_delivery - order.created_at, Duration::days(3));
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_order_workflow() {
        let mut order = Order::create(sample("ada@example.com", "35.99"));
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        assert_eq!(order.transition(OrderStatus::Delivered).unwrap(), OrderStatus::Shipped);
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_rejects_backwards_transition() {
        let mut order = Order::create(sample("ada@example.com", "35.99"));
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        let err = order.transition(OrderStatus::Pending).unwrap_err();
        assert_eq!(err, OrderError::InvalidTransition { from: OrderStatus::Shipped, to: OrderStatus::Pending });
        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(order.transition(OrderStatus::Shipped).is_ok());
    }

    #[test]
    fn test_delivered_cannot_cancel() {
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_new_order_validation() {
        assert!(sample("ada@example.com", "35.99").validate().is_ok());
        assert_eq!(sample("ada@example.com", "79228162514264337593543950335").validate(), Err(OrderError::InvalidTotal("79228162514264337593543950335".into())));
        assert!(matches!(sample("ada@example.com", "-1").validate(), Err(OrderError::InvalidTotal(_))));

        let mut zero = sample("ada@example.com", "15.99");
        zero.items[0].quantity = 0;
        assert_eq!(zero.validate(), Err(OrderError::InvalidItem("P1".into())));

        let mut empty = sample("ada@example.com", "15.99");
        empty.items.clear();
        assert_eq!(empty.validate(), Err(OrderError::NoItems));
    }

    #[test]
    fn test_item_count_saturates() {
        let mut new = sample("ada@example.com", "1.00");
        new.items.push(OrderItem { product_id: "P2".into(), name: "Gadget".into(), price: Price::new("1.00"), quantity: u32::MAX });
        assert_eq!(Order::create(new).item_count(), u32::MAX);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(" Shipped ".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!(matches!("on-hold".parse::<OrderStatus>(), Err(OrderError::UnknownStatus(_))));
    }
}
