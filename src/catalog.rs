//! Catalog queries: search, category filter and sort over product lists.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::Product;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep input order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
}

impl SortMode {
    /// Unrecognised names fall back to `Featured`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Featured,
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => Ordering::Equal,
            Self::PriceLow => a.price.amount().cmp(&b.price.amount()),
            Self::PriceHigh => b.price.amount().cmp(&a.price.amount()),
            Self::Rating => b.rating.value().cmp(&a.rating.value()),
            Self::Newest => b.created_at.cmp(&a.created_at),
        }
    }
}

/// Stable sort; ties keep their input order.
pub fn sort(products: &mut [Product], mode: SortMode) {
    products.sort_by(|a, b| mode.compare(a, b));
}

/// Active products whose name, description or category contains `query`.
pub fn search<'a>(products: impl IntoIterator<Item = &'a Product>, query: &str) -> Vec<Product> {
    let needle = query.to_lowercase();
    products.into_iter().filter(|p| p.is_active && p.matches(&needle)).cloned().collect()
}

/// Active products in exactly `category`.
pub fn by_category<'a>(products: impl IntoIterator<Item = &'a Product>, category: &str) -> Vec<Product> {
    products.into_iter().filter(|p| p.is_active && p.category == category).cloned().collect()
}

/// Distinct categories of active products, in first-seen order.
pub fn categories<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for p in products.into_iter().filter(|p| p.is_active) {
        if !seen.contains(&p.category) { seen.push(p.category.clone()); }
    }
    seen
}

/// Storefront listing query.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl ProductQuery {
    pub fn sort_mode(&self) -> SortMode { self.sort.as_deref().map(SortMode::parse).unwrap_or_default() }

    /// Applies search, then category, then sort. Empty parameters are ignored.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut out = match self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(q) => search(products, q),
            None => products.iter().filter(|p| p.is_active).cloned().collect(),
        };
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            out = by_category(&out, category);
        }
        sort(&mut out, self.sort_mode());
        out
    }
}

/// Admin table filter: search covers name and description only, and a
/// category of `"all"` (or none) matches everything.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AdminFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl AdminFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.as_deref().unwrap_or_default().to_lowercase();
        let matches_search = product.name.to_lowercase().contains(&needle) || product.description.to_lowercase().contains(&needle);
        let matches_category = match self.category.as_deref() {
            None | Some("") | Some("all") => true,
            Some(c) => product.category == c,
        };
        matches_search && matches_category
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::product::sample;
    use chrono::Duration;

    fn product(name: &str, price: &str, category: &str) -> Product { Product::create(sample(name, price, category)) }

    fn prices(products: &[Product]) -> Vec<&str> { products.iter().map(|p| p.price.as_str()).collect() }

    #[test]
    fn test_sort_price_low() {
        let mut ps = vec![product("A", "29.99", "X"), product("B", "299.99", "X"), product("C", "19.99", "X")];
        sort(&mut ps, SortMode::PriceLow);
        assert_eq!(prices(&ps), vec!["19.99", "29.99", "299.99"]);
        sort(&mut ps, SortMode::PriceHigh);
        assert_eq!(prices(&ps), vec!["299.99", "29.99", "19.99"]);
    }

    #[test]
    fn test_sort_rating_missing_is_zero() {
        let mut a = product("A", "1", "X");
        a.rating = crate::domain::value_objects::Rating::new("4.8");
        let mut b = product("B", "1", "X");
        b.rating = crate::domain::value_objects::Rating::unrated();
        let mut c = product("C", "1", "X");
        c.rating = crate::domain::value_objects::Rating::new("4.3");
        let mut ps = vec![a, b, c];
        sort(&mut ps, SortMode::Rating);
        let names: Vec<_> = ps.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_sort_newest_and_featured() {
        let mut old = product("Old", "1", "X");
        old.created_at -= Duration::days(1);
        let fresh = product("Fresh", "1", "X");
        let mut ps = vec![old, fresh];
        sort(&mut ps, SortMode::Featured);
        assert_eq!(ps[0].name, "Old");
        sort(&mut ps, SortMode::Newest);
        assert_eq!(ps[0].name, "Fresh");
    }

    #[test]
    fn test_parse_sort_mode() {
        assert_eq!(SortMode::parse("price-low"), SortMode::PriceLow);
        assert_eq!(SortMode::parse("bogus"), SortMode::Featured);
    }

    #[test]
    fn test_search_skips_inactive() {
        let mut hidden = product("Yoga Block", "9.99", "Sports");
        hidden.is_active = false;
        let ps = vec![product("Yoga Mat", "49.99", "Sports"), hidden, product("Novel", "9.99", "Books")];
        let found = search(&ps, "YOGA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Yoga Mat");
        assert_eq!(search(&ps, "sport").len(), 1);
    }

    #[test]
    fn test_category_is_exact() {
        let ps = vec![product("A", "1", "Home"), product("B", "1", "Home & Garden")];
        assert_eq!(by_category(&ps, "Home").len(), 1);
        assert_eq!(categories(&ps), vec!["Home".to_string(), "Home & Garden".to_string()]);
    }

    #[test]
    fn test_product_query_combines() {
        let ps = vec![product("Pro Mat", "49.99", "Sports"), product("Pro Book", "9.99", "Books"), product("Cheap Mat", "5.00", "Sports")];
        let q = ProductQuery { search: Some("mat".into()), category: Some("Sports".into()), sort: Some("price-low".into()) };
        let out = q.apply(&ps);
        assert_eq!(prices(&out), vec!["5.00", "49.99"]);
    }

    #[test]
    fn test_admin_filter() {
        let ps = vec![product("Lamp", "1", "Home"), product("Shirt", "1", "Clothing")];
        let all = AdminFilter { search: None, category: Some("all".into()) };
        assert_eq!(all.apply(&ps).len(), 2);
        let by_cat = AdminFilter { search: Some("lamp".into()), category: Some("Clothing".into()) };
        assert!(by_cat.apply(&ps).is_empty());
        let by_category_name = AdminFilter { search: Some("home".into()), category: None };
        assert!(by_category_name.apply(&ps).is_empty());
    }
}
