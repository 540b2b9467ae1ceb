//! In-memory entity store for products, orders and users.
//!
//! Holds everything for the lifetime of the process; nothing is written to
//! disk. Orders carry their own item snapshots, so product edits and deletes
//! never reach existing orders. Lookups of unknown ids yield `None`/`false`
//! rather than errors.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::catalog;
use crate::domain::aggregates::{NewOrder, NewProduct, NewUser, Order, OrderError, OrderStatus, Product, ProductPatch, User};
use crate::domain::events::{DomainEvent, OrderEvent, ProductEvent};
use crate::publisher::EventPublisher;
use crate::seed;

#[derive(Debug, Default)]
struct Tables {
    products: HashMap<String, Product>,
    /// Product ids in creation order.
    product_order: Vec<String>,
    orders: HashMap<String, Order>,
    users: HashMap<String, User>,
}

impl Tables {
    fn products_in_order(&self) -> impl Iterator<Item = &Product> {
        self.product_order.iter().filter_map(|id| self.products.get(id))
    }
}

#[derive(Debug, Default)]
pub struct MemStore {
    tables: RwLock<Tables>,
    events: EventPublisher,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl MemStore {
    pub fn new(events: EventPublisher) -> Self { Self { tables: RwLock::default(), events } }

    /// Store pre-loaded with the sample catalog.
    pub async fn seeded(events: EventPublisher) -> Self {
        let store = Self::new(events);
        let products = seed::sample_products();
        let count = products.len();
        for product in products {
            store.insert_product(Product::create(product)).await;
        }
        tracing::info!(products = count, "Seeded sample catalog");
        store
    }

    // Products

    /// Active products in creation order.
    pub async fn list_products(&self) -> Vec<Product> {
        self.tables.read().await.products_in_order().filter(|p| p.is_active).cloned().collect()
    }

    /// Every product, inactive ones included.
    pub async fn all_products(&self) -> Vec<Product> {
        self.tables.read().await.products_in_order().cloned().collect()
    }

    pub async fn get_product(&self, id: &str) -> Option<Product> {
        self.tables.read().await.products.get(id).cloned()
    }

    pub async fn create_product(&self, new: NewProduct) -> Product {
        let product = self.insert_product(Product::create(new)).await;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        self.events.publish(DomainEvent::Product(ProductEvent::Created { product_id: product.id.clone(), name: product.name.clone() })).await;
        product
    }

    async fn insert_product(&self, product: Product) -> Product {
        let mut tables = self.tables.write().await;
        tables.product_order.push(product.id.clone());
        tables.products.insert(product.id.clone(), product.clone());
        product
    }

    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        let updated = {
            let mut tables = self.tables.write().await;
            let product = tables.products.get_mut(id)?;
            product.apply(patch);
            product.clone()
        };
        tracing::info!(product_id = %id, "Product updated");
        self.events.publish(DomainEvent::Product(ProductEvent::Updated { product_id: id.to_string() })).await;
        Some(updated)
    }

    /// Removes the product outright; orders keep their snapshots.
    pub async fn delete_product(&self, id: &str) -> bool {
        let removed = {
            let mut tables = self.tables.write().await;
            let removed = tables.products.remove(id).is_some();
            if removed { tables.product_order.retain(|p| p != id); }
            removed
        };
        if removed {
            tracing::info!(product_id = %id, "Product deleted");
            self.events.publish(DomainEvent::Product(ProductEvent::Deleted { product_id: id.to_string() })).await;
        }
        removed
    }

    pub async fn search_products(&self, query: &str) -> Vec<Product> {
        catalog::search(self.tables.read().await.products_in_order(), query)
    }

    pub async fn products_by_category(&self, category: &str) -> Vec<Product> {
        catalog::by_category(self.tables.read().await.products_in_order(), category)
    }

    pub async fn categories(&self) -> Vec<String> {
        catalog::categories(self.tables.read().await.products_in_order())
    }

    // Orders

    /// Newest first.
    pub async fn list_orders(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.tables.read().await.orders.values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    pub async fn get_order(&self, id: &str) -> Option<Order> {
        self.tables.read().await.orders.get(id).cloned()
    }

    pub async fn create_order(&self, new: NewOrder) -> Order {
        let order = Order::create(new);
        self.tables.write().await.orders.insert(order.id.clone(), order.clone());
        tracing::info!(order_id = %order.id, total = %order.total, items = order.items.len(), "Order placed");
        self.events.publish(DomainEvent::Order(OrderEvent::Placed {
            order_id: order.id.clone(),
            customer_email: order.customer_email.clone(),
            total: order.total.to_string(),
        })).await;
        order
    }

    /// `Ok(None)` when the order does not exist; an error when the status
    /// table forbids the move.
    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>, StoreError> {
        let (order, from) = {
            let mut tables = self.tables.write().await;
            let Some(order) = tables.orders.get_mut(id) else { return Ok(None) };
            let from = order.transition(status)?;
            (order.clone(), from)
        };
        if from != status {
            tracing::info!(order_id = %id, %from, to = %status, "Order status changed");
            self.events.publish(DomainEvent::Order(OrderEvent::StatusChanged { order_id: id.to_string(), from, to: status })).await;
        }
        Ok(Some(order))
    }

    // Users

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.tables.read().await.users.get(id).cloned()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.tables.read().await.users.values().find(|u| u.username == username).cloned()
    }

    pub async fn create_user(&self, new: NewUser) -> User {
        let user = User::create(new);
        self.tables.write().await.users.insert(user.id.clone(), user.clone());
        tracing::info!(user_id = %user.id, "User created");
        user
    }
}
