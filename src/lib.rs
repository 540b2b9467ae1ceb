//! Storefront
//!
//! Self-contained storefront backend with an in-memory catalog.
//!
//! ## Features
//! - Product catalog with search, category filter and sorting
//! - Client-local shopping cart with flat-rate shipping
//! - Checkout with simulated payment
//! - Order tracking through a fixed five-step view
//! - Admin product management and dashboard figures
//! - Job board with saved jobs, alerts and applications in local storage

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod jobs;
pub mod local_storage;
pub mod publisher;
pub mod seed;
pub mod store;

pub use api::{router, AppState};
pub use checkout::{Checkout, CheckoutError, CheckoutForm};
pub use config::Config;
pub use domain::aggregates::{Cart, CartEntry, CartItem, NewOrder, NewProduct, Order, OrderItem, OrderStatus, Product, ShippingAddress};
pub use jobs::{JobBoard, JobQuery};
pub use publisher::EventPublisher;
pub use store::{MemStore, StoreError};
