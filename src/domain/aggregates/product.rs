//! Product Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::value_objects::{Price, Rating};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub stock: u32,
    pub image_url: String,
    #[serde(default)]
    pub rating: Rating,
    pub review_count: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a product; the id and timestamp are assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    #[serde(default)]
    pub stock: Option<u32>,
    pub image_url: String,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial update; absent fields keep their current value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub image_url: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<u32>,
    pub is_active: Option<bool>,
}

impl Product {
    pub fn create(new: NewProduct) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
            stock: new.stock.unwrap_or(0),
            image_url: new.image_url,
            rating: new.rating.filter(|r| !r.is_empty()).map(Rating::new).unwrap_or_default(),
            review_count: new.review_count.unwrap_or(0),
            is_active: new.is_active.unwrap_or(true),
            created_at: Utc::now(),
        }
    }

    pub fn is_in_stock(&self) -> bool { self.stock > 0 }

    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(v) = patch.name { self.name = v; }
        if let Some(v) = patch.description { self.description = v; }
        if let Some(v) = patch.price { self.price = v; }
        if let Some(v) = patch.category { self.category = v; }
        if let Some(v) = patch.stock { self.stock = v; }
        if let Some(v) = patch.image_url { self.image_url = v; }
        if let Some(v) = patch.rating { self.rating = Rating::new(v); }
        if let Some(v) = patch.review_count { self.review_count = v; }
        if let Some(v) = patch.is_active { self.is_active = v; }
    }

    /// Case-insensitive substring match over name, description and category.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self.category.to_lowercase().contains(needle_lower)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("Missing name")]
    MissingName,
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() { return Err(ProductError::MissingName); }
        if !self.price.is_valid() { return Err(ProductError::InvalidPrice(self.price.to_string())); }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample(name: &str, price: &str, category: &str) -> NewProduct {
    NewProduct {
        name: name.into(), description: format!("{name} description"), price: Price::new(price),
        category: category.into(), stock: Some(5), image_url: "https://img.example/p.jpg".into(),
        rating: None, review_count: None, is_active: None,
    }
}
