//! Checkout: form validation, simulated payment, order creation.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::domain::aggregates::cart::{self, Cart, CartItem};
use crate::domain::aggregates::{NewOrder, Order, OrderStatus, ShippingAddress};
use crate::domain::value_objects::{format_amount, Price, SHIPPING_FLAT};
use crate::local_storage::KeyValueStore;
use crate::store::MemStore;

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub customer_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub customer_email: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "ZIP code is required"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 16, message = "Card number must be 16 digits"))]
    pub card_number: String,
    #[validate(length(min = 5, message = "Expiry date is required"))]
    pub expiry_date: String,
    #[validate(length(min = 3, message = "CVV must be 3 digits"))]
    pub cvv: String,
}

impl CheckoutForm {
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            name: self.customer_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            country: self.country.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Invalid checkout form: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("Cart is empty")]
    EmptyCart,
    /// Zero quantity or a price outside the accepted range.
    #[error("Invalid cart line: {0}")]
    InvalidItem(String),
    #[error("Order total is too large")]
    AmountOverflow,
}

impl CheckoutError {
    /// Field name to messages, for showing next to each input.
    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        let Self::Invalid(errors) = self else { return BTreeMap::new() };
        errors.field_errors().into_iter()
            .map(|(field, errs)| {
                let messages = errs.iter().map(|e| e.message.as_deref().unwrap_or(e.code.as_ref()).to_string()).collect();
                (field.to_string(), messages)
            })
            .collect()
    }
}

/// Cart total as charged at checkout: line totals plus flat shipping.
pub fn order_total(items: &[CartItem]) -> Result<Price, CheckoutError> {
    let total = items.iter()
        .try_fold(SHIPPING_FLAT, |sum, i| i.price.checked_multiply(i.quantity).and_then(|line| sum.checked_add(line)))
        .ok_or(CheckoutError::AmountOverflow)?;
    Ok(Price::new(format_amount(total)))
}

fn check_lines(items: &[CartItem]) -> Result<(), CheckoutError> {
    if items.is_empty() { return Err(CheckoutError::EmptyCart); }
    match items.iter().find(|i| i.quantity == 0 || !i.price.is_valid()) {
        Some(bad) => Err(CheckoutError::InvalidItem(bad.product_id.clone())),
        None => Ok(()),
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Checkout { payment_delay: Duration }

impl Default for Checkout {
    fn default() -> Self { Self::new(DEFAULT_PAYMENT_DELAY) }
}

impl Checkout {
    pub fn new(payment_delay: Duration) -> Self { Self { payment_delay } }

    pub fn payment_delay(&self) -> Duration { self.payment_delay }

    /// Places an order for `items` without touching any cart. Nothing is
    /// created when validation fails.
    pub async fn place_order(&self, form: &CheckoutForm, items: &[CartItem], store: &MemStore) -> Result<Order, CheckoutError> {
        form.validate()?;
        check_lines(items)?;
        let total = order_total(items)?;

        tracing::debug!(delay_ms = self.payment_delay.as_millis() as u64, "Simulating payment");
        tokio::time::sleep(self.payment_delay).await;

        let order = store.create_order(NewOrder {
            customer_name: form.customer_name.clone(),
            customer_email: form.customer_email.clone(),
            status: Some(OrderStatus::Pending),
            total,
            items: cart::snapshot(items),
            shipping_address: form.shipping_address(),
        }).await;
        Ok(order)
    }

    /// Checks out `cart` and empties it once the order exists. The returned
    /// order's id keys the tracking page.
    pub async fn submit<S: KeyValueStore>(&self, form: &CheckoutForm, cart: &mut Cart<S>, store: &MemStore) -> Result<Order, CheckoutError> {
        let order = self.place_order(form, cart.items(), store).await?;
        if let Err(e) = cart.clear() {
            tracing::error!(order_id = %order.id, error = %e, "Order placed but cart could not be cleared");
        }
        Ok(order)
    }
}

#[cfg(test)]
pub(crate) fn valid_form() -> CheckoutForm {
    CheckoutForm {
        customer_name: "Ada Lovelace".into(),
        customer_email: "ada@example.com".into(),
        address: "1 Analytical Way".into(),
        city: "London".into(),
        state: "LDN".into(),
        zip_code: "N1 9GU".into(),
        country: "United Kingdom".into(),
        card_number: "4242424242424242".into(),
        expiry_date: "12/30".into(),
        cvv: "123".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::CartEntry;
    use crate::local_storage::{MemoryStorage, CART_KEY};
    use crate::publisher::EventPublisher;

    fn cart_with_items() -> Cart<MemoryStorage> {
        let mut cart = Cart::load(MemoryStorage::new());
        cart.add(CartEntry { product_id: "P1".into(), name: "Widget".into(), price: Price::new("10.00"), image_url: String::new() }).unwrap();
        cart.add(CartEntry { product_id: "P1".into(), name: "Widget".into(), price: Price::new("10.00"), image_url: String::new() }).unwrap();
        cart
    }

    #[test]
    fn test_form_rules() {
        assert!(valid_form().validate().is_ok());
        let mut form = valid_form();
        form.customer_email = "not-an-email".into();
        form.card_number = "4242".into();
        form.cvv = "12".into();
        let err = CheckoutError::from(form.validate().unwrap_err());
        let fields = err.field_messages();
        assert_eq!(fields.len(), 3);
        assert!(fields.values().flatten().any(|m| m == "Card number must be 16 digits"));
    }

    #[tokio::test]
    async fn test_submit_creates_order_and_clears_cart() {
        let store = MemStore::new(EventPublisher::disabled());
        let mut cart = cart_with_items();
        let order = Checkout::new(Duration::ZERO).submit(&valid_form(), &mut cart, &store).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total.as_str(), "35.99");
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.shipping_address.zip_code, "N1 9GU");
        assert!(cart.is_empty());
        assert_eq!(cart.storage().get(CART_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get_order(&order.id).await, Some(order));
    }

    #[tokio::test]
    async fn test_invalid_form_keeps_cart() {
        let store = MemStore::new(EventPublisher::disabled());
        let mut cart = cart_with_items();
        let mut form = valid_form();
        form.city.clear();
        let err = Checkout::new(Duration::ZERO).submit(&form, &mut cart, &store).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(_)));
        assert_eq!(cart.item_count(), 2);
        assert!(store.list_orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let store = MemStore::new(EventPublisher::disabled());
        let mut cart = Cart::load(MemoryStorage::new());
        let err = Checkout::new(Duration::ZERO).submit(&valid_form(), &mut cart, &store).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    fn line(product_id: &str, price: &str, quantity: u32) -> CartItem {
        CartItem { product_id: product_id.into(), name: "Widget".into(), price: Price::new(price), image_url: String::new(), quantity }
    }

    #[test]
    fn test_order_total() {
        let total = order_total(&[line("P1", "10.00", 2), line("P2", "0.10", 3)]).unwrap();
        assert_eq!(total.as_str(), "36.29");
        let err = order_total(&[line("P1", "79228162514264337593543950335", 2)]).unwrap_err();
        assert!(matches!(err, CheckoutError::AmountOverflow));
    }

    #[tokio::test]
    async fn test_rejects_bad_lines() {
        let store = MemStore::new(EventPublisher::disabled());
        let checkout = Checkout::new(Duration::ZERO);
        let cases = [
            vec![line("P1", "10.00", 1), line("P2", "10.00", 0)],
            vec![line("P1", "79228162514264337593543950335", 2)],
            vec![line("P1", "-5.00", 1)],
            vec![line("P1", "free", 1)],
        ];
        for items in cases {
            let err = checkout.place_order(&valid_form(), &items, &store).await.unwrap_err();
            assert!(matches!(err, CheckoutError::InvalidItem(_)), "{err}");
        }
        assert!(store.list_orders().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_payment_delay() {
        let store = MemStore::new(EventPublisher::disabled());
        let mut cart = cart_with_items();
        let started = tokio::time::Instant::now();
        Checkout::default().submit(&valid_form(), &mut cart, &store).await.unwrap();
        assert!(started.elapsed() >= DEFAULT_PAYMENT_DELAY);
    }
}
