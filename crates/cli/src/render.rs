//! Human-readable output.

use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Style, Theme, object::Columns},
};

use stocktrack_alerts::{Alert, InventoryReport, InventoryStats};
use stocktrack_inventory::ScanResolution;
use stocktrack_products::Product;

fn finish(builder: Builder) -> Table {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    theme.remove_horizontal_lines();
    table.with(theme);
    table
}

pub fn products_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record([
        "ID", "Name", "Barcode", "Qty", "Min", "Expiry", "Supplier", "Price",
    ]);
    for product in products {
        builder.push_record([
            product.id_typed().to_string(),
            product.name().to_string(),
            product.barcode().to_string(),
            product.quantity().to_string(),
            product.min_stock().to_string(),
            product.expiry_date().to_string(),
            product.supplier().to_string(),
            product.price().normalize().to_string(),
        ]);
    }

    let mut table = finish(builder);
    table.modify(Columns::new(3..5), Alignment::right());
    table.modify(Columns::new(7..8), Alignment::right());
    table.to_string()
}

pub fn product_details(product: &Product) -> String {
    let mut builder = Builder::default();
    let rows = [
        ("ID", product.id_typed().to_string()),
        ("Name", product.name().to_string()),
        ("Barcode", product.barcode().to_string()),
        ("Quantity", product.quantity().to_string()),
        ("Minimum stock", product.min_stock().to_string()),
        ("Expiry date", product.expiry_date().to_string()),
        ("Supplier", product.supplier().to_string()),
        ("Price", product.price().normalize().to_string()),
        ("Stock value", product.stock_value().normalize().to_string()),
    ];
    for (label, value) in rows {
        builder.push_record([label.to_string(), value]);
    }
    finish(builder).to_string()
}

pub fn alerts_table(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No alerts.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Severity", "Type", "Product ID", "Message"]);
    for alert in alerts {
        builder.push_record([
            alert.severity.as_str().to_string(),
            alert.kind.as_str().to_string(),
            alert.product_id.to_string(),
            alert.message.clone(),
        ]);
    }
    finish(builder).to_string()
}

pub fn stats_table(stats: &InventoryStats) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Products".to_string(), stats.total_products.to_string()]);
    builder.push_record(["Units in stock".to_string(), stats.total_stock.to_string()]);
    builder.push_record(["Stock value".to_string(), stats.total_value.normalize().to_string()]);
    builder.push_record(["Low stock".to_string(), stats.low_stock_count.to_string()]);
    builder.push_record(["Expiring soon".to_string(), stats.expiring_count.to_string()]);
    builder.push_record(["Expired".to_string(), stats.expired_count.to_string()]);

    let mut table = finish(builder);
    table.modify(Columns::new(1..2), Alignment::right());

    let mut out = table.to_string();
    if !stats.top_products.is_empty() {
        let mut top = Builder::default();
        top.push_record(["Top products by value", "Value"]);
        for product in &stats.top_products {
            top.push_record([
                product.name().to_string(),
                product.stock_value().normalize().to_string(),
            ]);
        }
        let mut top = finish(top);
        top.modify(Columns::new(1..2), Alignment::right());
        out.push('\n');
        out.push_str(&top.to_string());
    }
    out
}

pub fn report_text(report: &InventoryReport) -> String {
    format!(
        "Inventory report generated {}\n\n{}\n\n{}\n\n{}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S"),
        stats_table(&report.stats),
        alerts_table(&report.alerts),
        products_table(&report.products),
    )
}

pub fn scan_text(resolution: &ScanResolution) -> String {
    match resolution {
        ScanResolution::Ignored => "Empty scan ignored.".to_string(),
        ScanResolution::Known(product) => format!(
            "{} ({}): {} in stock\n{}",
            product.name(),
            product.barcode(),
            product.quantity(),
            product_details(product)
        ),
        ScanResolution::Unknown {
            code,
            format,
            valid_checksum,
            country,
        } => {
            let mut out = format!("Unknown code {code}\n  format:  {format}\n  country: {country}");
            if *format == stocktrack_barcode::BarcodeFormat::Ean13 {
                let verdict = if *valid_checksum { "valid" } else { "invalid" };
                out.push_str(&format!("\n  check digit: {verdict}"));
            }
            out
        }
    }
}
