//! Admin dashboard figures.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::aggregates::{Order, OrderStatus, Product};
use crate::domain::value_objects::format_amount;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub orders_today: usize,
    /// Sum of all order totals, two decimal places.
    pub total_revenue: String,
    /// Distinct customer emails across all orders.
    pub unique_customers: usize,
    pub orders_by_status: Vec<(OrderStatus, usize)>,
}

impl DashboardStats {
    /// `today` is a calendar date in the server's local timezone.
    pub fn compute(products: &[Product], orders: &[Order], today: NaiveDate) -> Self {
        let orders_today = orders.iter().filter(|o| local_date(o.created_at) == today).count();
        let revenue = orders.iter().fold(Decimal::ZERO, |sum, o| sum.saturating_add(o.total_amount()));
        let unique_customers = orders.iter().map(|o| o.customer_email.as_str()).collect::<HashSet<_>>().len();
        let orders_by_status = OrderStatus::ALL.iter()
            .map(|&s| (s, orders.iter().filter(|o| o.status == s).count()))
            .collect();
        Self {
            total_products: products.len(),
            orders_today,
            total_revenue: format_amount(revenue),
            unique_customers,
            orders_by_status,
        }
    }

    pub fn now(products: &[Product], orders: &[Order]) -> Self {
        Self::compute(products, orders, Local::now().date_naive())
    }
}

fn local_date(ts: DateTime<Utc>) -> NaiveDate { ts.with_timezone(&Local).date_naive() }
