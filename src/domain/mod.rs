//! Storefront domain model
pub mod aggregates;
pub mod events;
pub mod tracking;
pub mod value_objects;
