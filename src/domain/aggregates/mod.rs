//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;
pub mod user;

pub use product::{NewProduct, Product, ProductError, ProductPatch};
pub use order::{NewOrder, Order, OrderError, OrderItem, OrderStatus, ShippingAddress};
pub use cart::{Cart, CartEntry, CartError, CartItem};
pub use user::{NewUser, User};
