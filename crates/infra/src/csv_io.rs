//! CSV interchange for product lists.
//!
//! Columns are positional: `name, barcode, quantity, min_stock, expiry_date,
//! supplier, price`. On import the first row is always treated as a header.

use std::io;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use stocktrack_products::{NumericInput, Product, ProductDraft};

pub const CSV_HEADER: [&str; 7] = [
    "name",
    "barcode",
    "quantity",
    "min_stock",
    "expiry_date",
    "supplier",
    "price",
];

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("exported csv is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    barcode: &'a str,
    quantity: u64,
    min_stock: u64,
    expiry_date: &'a str,
    supplier: &'a str,
    price: String,
}

impl<'a> From<&'a Product> for CsvRow<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            name: p.name(),
            barcode: p.barcode(),
            quantity: p.quantity(),
            min_stock: p.min_stock(),
            expiry_date: p.expiry_date(),
            supplier: p.supplier(),
            price: p.price().normalize().to_string(),
        }
    }
}

/// Write `products` as CSV, header first.
pub fn export_csv<W: io::Write>(products: &[Product], writer: W) -> Result<(), CsvError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for product in products {
        wtr.serialize(CsvRow::from(product))?;
    }
    if products.is_empty() {
        wtr.write_record(CSV_HEADER)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv_string(products: &[Product]) -> Result<String, CsvError> {
    let mut buf = Vec::new();
    export_csv(products, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Suggested download name, e.g. `inventory_2026-10-19.csv`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("inventory_{}.csv", date.format("%Y-%m-%d"))
}

fn optional_text(record: &csv::StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn optional_number(record: &csv::StringRecord, index: usize) -> Option<NumericInput> {
    optional_text(record, index).map(NumericInput::Text)
}

/// Read product drafts from CSV.
///
/// Blank lines are skipped. Rows with an empty name are skipped with a
/// warning. Numeric columns go through the product parse-with-default policy,
/// so a bad number never rejects a row.
pub fn parse_csv<R: io::Read>(reader: R) -> Result<Vec<ProductDraft>, CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut drafts = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        let Some(name) = optional_text(&record, 0) else {
            if record.iter().any(|field| !field.trim().is_empty()) {
                tracing::warn!(row = index + 2, "skipping csv row without a name");
            }
            continue;
        };

        drafts.push(ProductDraft {
            name,
            barcode: optional_text(&record, 1),
            quantity: optional_number(&record, 2),
            min_stock: optional_number(&record, 3),
            expiry_date: optional_text(&record, 4),
            supplier: optional_text(&record, 5),
            price: optional_number(&record, 6),
        });
    }

    tracing::debug!(count = drafts.len(), "parsed csv rows");
    Ok(drafts)
}
