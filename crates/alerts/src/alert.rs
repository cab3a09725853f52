use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stocktrack_core::ProductId;
use stocktrack_products::Product;

/// Products expiring within this many days (inclusive) raise an expiry alert.
pub const EXPIRY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Stock,
    Expiry,
    Expired,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Stock => "stock",
            AlertKind::Expiry => "expiry",
            AlertKind::Expired => "expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
        }
    }
}

/// A transient warning about one product.
///
/// `product_id` is a lookup key back into the store, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub product: String,
    pub product_id: ProductId,
}

impl Alert {
    fn new(kind: AlertKind, severity: Severity, product: &Product, message: String) -> Self {
        Self {
            kind,
            severity,
            message,
            product: product.name().to_string(),
            product_id: product.id_typed(),
        }
    }
}

/// Whole calendar days from `today` until `expiry` (negative once past).
pub fn days_until_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

fn stock_alert(product: &Product) -> Option<Alert> {
    if product.quantity() > product.min_stock() {
        return None;
    }
    let severity = if product.quantity() == 0 {
        Severity::Critical
    } else {
        Severity::High
    };
    let message = format!(
        "{}: only {} units left (minimum: {})",
        product.name(),
        product.quantity(),
        product.min_stock()
    );
    Some(Alert::new(AlertKind::Stock, severity, product, message))
}

fn expiry_alert(product: &Product, today: NaiveDate) -> Option<Alert> {
    let raw = product.expiry_date();
    if raw.trim().is_empty() {
        return None;
    }
    let Some(expiry) = product.expiry() else {
        tracing::warn!(
            product_id = %product.id_typed(),
            expiry_date = raw,
            "skipping expiry check for unparseable date"
        );
        return None;
    };

    let days = days_until_expiry(expiry, today);
    if days <= 0 {
        let message = format!("{}: EXPIRED ({raw})", product.name());
        Some(Alert::new(AlertKind::Expired, Severity::Critical, product, message))
    } else if days <= EXPIRY_WINDOW_DAYS {
        let message = format!("{}: expires in {days} days ({raw})", product.name());
        Some(Alert::new(AlertKind::Expiry, Severity::Medium, product, message))
    } else {
        None
    }
}

/// Derive the current alert list.
///
/// Single pass in collection order. Per product the stock alert (if any)
/// precedes the expiry alert (if any). No deduplication, no re-ranking.
pub fn derive_alerts(products: &[Product], today: NaiveDate) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for product in products {
        alerts.extend(stock_alert(product));
        alerts.extend(expiry_alert(product, today));
    }
    alerts
}
