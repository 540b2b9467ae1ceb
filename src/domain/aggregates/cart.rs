//! Cart Aggregate
//!
//! Client-local cart mirrored into a [`KeyValueStore`] under
//! [`CART_KEY`]: every mutation rewrites the whole item list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::aggregates::order::OrderItem;
use crate::domain::value_objects::{Price, SHIPPING_FLAT};
use crate::local_storage::{KeyValueStore, StorageError, CART_KEY};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    pub quantity: u32,
}

/// What the storefront hands the cart when "add to cart" is pressed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry { pub product_id: String, pub name: String, pub price: Price, pub image_url: String }

impl CartItem {
    /// Saturates at `Decimal::MAX`; checkout re-checks with [`Price::checked_multiply`].
    pub fn line_total(&self) -> Decimal { self.price.saturating_multiply(self.quantity) }
}

impl From<&crate::domain::aggregates::Product> for CartEntry {
    fn from(p: &crate::domain::aggregates::Product) -> Self {
        Self { product_id: p.id.clone(), name: p.name.clone(), price: p.price.clone(), image_url: p.image_url.clone() }
    }
}

#[derive(Debug)]
pub struct Cart<S: KeyValueStore> {
    items: Vec<CartItem>,
    storage: S,
}

impl<S: KeyValueStore> Cart<S> {
    /// Rehydrates from storage. A missing or unreadable entry yields an empty cart.
    pub fn load(storage: S) -> Self {
        let items = match storage.get(CART_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable saved cart");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved cart");
                Vec::new()
            }
        };
        Self { items, storage }
    }

    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn storage(&self) -> &S { &self.storage }
    pub fn into_storage(self) -> S { self.storage }

    /// Increments an existing line, keeping its original name/price snapshot,
    /// or inserts a new line at quantity 1.
    pub fn add(&mut self, entry: CartEntry) -> Result<(), CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == entry.product_id) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem { product_id: entry.product_id, name: entry.name, price: entry.price, image_url: entry.image_url, quantity: 1 });
        }
        self.persist()
    }

    pub fn remove(&mut self, product_id: &str) -> Result<(), CartError> {
        self.items.retain(|i| i.product_id != product_id);
        self.persist()
    }

    /// Zero or negative quantities remove the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 { return self.remove(product_id); }
        let quantity = u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity))?;
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.persist()
    }

    pub fn item_count(&self) -> u32 { self.items.iter().fold(0, |n, i| n.saturating_add(i.quantity)) }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |sum, i| sum.saturating_add(i.line_total()))
    }

    /// Flat rate, charged whatever the subtotal.
    pub fn shipping(&self) -> Decimal { SHIPPING_FLAT }

    pub fn total(&self) -> Decimal { self.subtotal().saturating_add(self.shipping()) }

    pub fn snapshot(&self) -> Vec<OrderItem> { snapshot(&self.items) }

    fn persist(&mut self) -> Result<(), CartError> {
        let json = serde_json::to_string(&self.items)?;
        self.storage.set(CART_KEY, json)?;
        tracing::debug!(lines = self.items.len(), "Cart persisted");
        Ok(())
    }
}

pub fn snapshot(items: &[CartItem]) -> Vec<OrderItem> {
    items.iter().map(|i| OrderItem { product_id: i.product_id.clone(), name: i.name.clone(), price: i.price.clone(), quantity: i.quantity }).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
    #[error("Cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
