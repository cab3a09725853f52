//! `stocktrack-alerts`
//!
//! **Responsibility:** derived views over the product collection.
//!
//! - Alerts, statistics and reports are recomputed from live data on every call.
//! - Nothing here is persisted and nothing here mutates products.
//! - "Today" is always supplied by the caller.

pub mod alert;
pub mod report;
pub mod stats;

pub use alert::{Alert, AlertKind, EXPIRY_WINDOW_DAYS, Severity, days_until_expiry, derive_alerts};
pub use report::{InventoryReport, generate_report};
pub use stats::{InventoryStats, TOP_PRODUCTS, inventory_stats};
