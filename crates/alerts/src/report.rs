use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use stocktrack_products::Product;

use crate::alert::{Alert, derive_alerts};
use crate::stats::InventoryStats;

/// Point-in-time snapshot for printing or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub generated_at: NaiveDateTime,
    pub stats: InventoryStats,
    pub alerts: Vec<Alert>,
    pub products: Vec<Product>,
}

/// Build a report; alerts are evaluated against the calendar day of `generated_at`.
pub fn generate_report(products: &[Product], generated_at: NaiveDateTime) -> InventoryReport {
    let alerts = derive_alerts(products, generated_at.date());
    let stats = InventoryStats::from_parts(products, &alerts);

    InventoryReport {
        generated_at,
        stats,
        alerts,
        products: products.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stocktrack_products::demo_products;

    #[test]
    fn report_bundles_stats_alerts_and_products() {
        let at = NaiveDate::from_ymd_opt(2025, 10, 25)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let products = demo_products();
        let report = generate_report(&products, at);

        assert_eq!(report.generated_at, at);
        assert_eq!(report.products, products);
        assert_eq!(report.stats.total_products, 5);
        assert_eq!(report.stats.low_stock_count + report.stats.expiring_count + report.stats.expired_count, report.alerts.len());
        // Leche expires 2025-10-28: three days out.
        assert_eq!(report.stats.expiring_count, 1);
    }
}
