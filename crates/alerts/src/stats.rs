use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stocktrack_products::Product;

use crate::alert::{Alert, AlertKind, derive_alerts};

/// How many products `top_products` keeps.
pub const TOP_PRODUCTS: usize = 5;

/// Aggregate figures for dashboards and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,
    pub total_stock: u64,
    pub total_value: Decimal,
    pub low_stock_count: usize,
    pub expiring_count: usize,
    pub expired_count: usize,
    /// Highest stock value first; ties keep collection order.
    pub top_products: Vec<Product>,
}

impl InventoryStats {
    /// Compute from a product list and the alerts already derived from it.
    pub fn from_parts(products: &[Product], alerts: &[Alert]) -> Self {
        let count = |kind: AlertKind| alerts.iter().filter(|a| a.kind == kind).count();

        let mut top_products = products.to_vec();
        top_products.sort_by(|a, b| b.stock_value().cmp(&a.stock_value()));
        top_products.truncate(TOP_PRODUCTS);

        Self {
            total_products: products.len(),
            total_stock: products.iter().fold(0u64, |acc, p| acc.saturating_add(p.quantity())),
            total_value: products.iter().map(Product::stock_value).sum(),
            low_stock_count: count(AlertKind::Stock),
            expiring_count: count(AlertKind::Expiry),
            expired_count: count(AlertKind::Expired),
            top_products,
        }
    }
}

pub fn inventory_stats(products: &[Product], today: NaiveDate) -> InventoryStats {
    let alerts = derive_alerts(products, today);
    InventoryStats::from_parts(products, &alerts)
}
