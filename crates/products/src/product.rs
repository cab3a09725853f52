use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stocktrack_core::{Entity, ProductId};

use crate::coerce::{self, NumericInput};
use crate::stored;

fn default_min_stock() -> u64 {
    coerce::DEFAULT_MIN_STOCK
}

/// Entity: Product.
///
/// Serialized with the persisted field names (`minStock`, `expiryDate`).
/// Optional text fields are stored as empty strings when absent. Reading is
/// lenient: every field except `id` falls back to its default instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    #[serde(default, deserialize_with = "stored::text")]
    name: String,
    #[serde(default, deserialize_with = "stored::text")]
    barcode: String,
    #[serde(default, deserialize_with = "stored::quantity")]
    quantity: u64,
    #[serde(default = "default_min_stock", deserialize_with = "stored::min_stock")]
    min_stock: u64,
    #[serde(default, deserialize_with = "stored::text")]
    expiry_date: String,
    #[serde(default, deserialize_with = "stored::text")]
    supplier: String,
    #[serde(default, deserialize_with = "stored::price")]
    price: Decimal,
}

impl Product {
    /// Build a product from loosely-typed input, applying the field defaults.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            barcode: draft.barcode.unwrap_or_default(),
            quantity: coerce::quantity_or_default(draft.quantity.as_ref()),
            min_stock: coerce::min_stock_or_default(draft.min_stock.as_ref()),
            expiry_date: draft.expiry_date.unwrap_or_default(),
            supplier: draft.supplier.unwrap_or_default(),
            price: coerce::price_or_default(draft.price.as_ref()),
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn min_stock(&self) -> u64 {
        self.min_stock
    }

    /// Raw expiry date as stored (may be empty or unparseable).
    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Stock value of this line (`quantity * price`).
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }

    /// Parsed expiry date, if one is present and readable.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
    /// timestamps; the time of day is discarded.
    pub fn expiry(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.expiry_date)
    }

    /// Set the stock level, clamping negative values to zero.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = coerce::clamp_quantity(quantity);
    }

    /// Merge a patch over this product. The id never changes.
    ///
    /// Numeric fields that are present but unreadable leave the current value
    /// in place.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(barcode) = patch.barcode {
            self.barcode = barcode;
        }
        if let Some(quantity) = patch.quantity.as_ref().and_then(NumericInput::as_integer) {
            self.set_quantity(quantity);
        }
        if let Some(min_stock) = patch.min_stock.as_ref().and_then(NumericInput::as_integer) {
            self.min_stock = coerce::clamp_quantity(min_stock);
        }
        if let Some(expiry_date) = patch.expiry_date {
            self.expiry_date = expiry_date;
        }
        if let Some(supplier) = patch.supplier {
            self.supplier = supplier;
        }
        if let Some(price) = patch.price.as_ref().and_then(NumericInput::as_decimal) {
            self.price = coerce::clamp_price(price);
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Parse a stored date string into a calendar date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Input for creating a product.
///
/// Only `name` is required. Numeric fields accept numbers or text; see
/// [`crate::coerce`] for how malformed values are defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub barcode: Option<String>,
    pub quantity: Option<NumericInput>,
    pub min_stock: Option<NumericInput>,
    pub expiry_date: Option<String>,
    pub supplier: Option<String>,
    pub price: Option<NumericInput>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<NumericInput>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn with_min_stock(mut self, min_stock: impl Into<NumericInput>) -> Self {
        self.min_stock = Some(min_stock.into());
        self
    }

    pub fn with_expiry_date(mut self, expiry_date: impl Into<String>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<NumericInput>) -> Self {
        self.price = Some(price.into());
        self
    }
}

/// Partial update for an existing product. Absent fields are left unchanged.
///
/// There is deliberately no `id` field: an `id` key in incoming JSON is
/// ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub quantity: Option<NumericInput>,
    pub min_stock: Option<NumericInput>,
    pub expiry_date: Option<String>,
    pub supplier: Option<String>,
    pub price: Option<NumericInput>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_id() -> ProductId {
        ProductId::new(1_700_000_000_000)
    }

    #[test]
    fn from_draft_applies_defaults() {
        let product = Product::from_draft(test_id(), ProductDraft::new("Yerba 1kg"));

        assert_eq!(product.id_typed(), test_id());
        assert_eq!(product.name(), "Yerba 1kg");
        assert_eq!(product.barcode(), "");
        assert_eq!(product.quantity(), 0);
        assert_eq!(product.min_stock(), 5);
        assert_eq!(product.expiry_date(), "");
        assert_eq!(product.supplier(), "");
        assert_eq!(product.price(), Decimal::ZERO);
    }

    #[test]
    fn from_draft_coerces_text_numbers() {
        let draft = ProductDraft::new("Milk")
            .with_quantity("12")
            .with_min_stock("three")
            .with_price("950.50");
        let product = Product::from_draft(test_id(), draft);

        assert_eq!(product.quantity(), 12);
        assert_eq!(product.min_stock(), 5);
        assert_eq!(product.price(), Decimal::new(95050, 2));
    }

    #[test]
    fn apply_patch_merges_present_fields_only() {
        let mut product = Product::from_draft(
            test_id(),
            ProductDraft::new("Milk").with_quantity(3).with_supplier("Dairy Co"),
        );

        product.apply_patch(ProductPatch {
            name: Some("Whole Milk".to_string()),
            price: Some(NumericInput::from(999)),
            ..ProductPatch::default()
        });

        assert_eq!(product.id_typed(), test_id());
        assert_eq!(product.name(), "Whole Milk");
        assert_eq!(product.quantity(), 3);
        assert_eq!(product.supplier(), "Dairy Co");
        assert_eq!(product.price(), Decimal::from(999));
    }

    #[test]
    fn apply_patch_clamps_negative_quantity() {
        let mut product = Product::from_draft(test_id(), ProductDraft::new("Milk").with_quantity(3));
        product.apply_patch(ProductPatch {
            quantity: Some(NumericInput::from(-5)),
            ..ProductPatch::default()
        });
        assert_eq!(product.quantity(), 0);
    }

    #[test]
    fn apply_patch_keeps_value_when_number_is_unreadable() {
        let mut product = Product::from_draft(test_id(), ProductDraft::new("Milk").with_min_stock(12));
        product.apply_patch(ProductPatch {
            min_stock: Some(NumericInput::from("twelve")),
            ..ProductPatch::default()
        });
        assert_eq!(product.min_stock(), 12);
    }

    #[test]
    fn patch_ignores_id_in_json() {
        let patch: ProductPatch = serde_json::from_str(r#"{"id": 99, "name": "Renamed"}"#).unwrap();
        let mut product = Product::from_draft(test_id(), ProductDraft::new("Milk"));
        product.apply_patch(patch);
        assert_eq!(product.id_typed(), test_id());
        assert_eq!(product.name(), "Renamed");
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let product = Product::from_draft(
            ProductId::new(1),
            ProductDraft::new("Coca-Cola 2.25L")
                .with_barcode("7790895000015")
                .with_quantity(12)
                .with_min_stock(10)
                .with_expiry_date("2025-12-31")
                .with_supplier("Distribuidora Sur")
                .with_price(1500),
        );
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["minStock"], 10);
        assert_eq!(value["expiryDate"], "2025-12-31");
        assert!(value["price"].is_number());
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 8);
    }

    #[test]
    fn deserializes_sparse_documents_with_defaults() {
        let product: Product = serde_json::from_str(r#"{"id": 7, "name": "Rice"}"#).unwrap();
        assert_eq!(product.min_stock(), 5);
        assert_eq!(product.quantity(), 0);
        assert_eq!(product.barcode(), "");
    }

    #[test]
    fn malformed_stored_fields_fall_back_instead_of_failing() {
        let raw = r#"{
            "id": 9,
            "name": "Soda",
            "barcode": 7791234567890,
            "quantity": -5,
            "minStock": "8 units",
            "expiryDate": null,
            "supplier": {"name": "Sur"},
            "price": "1.5e3"
        }"#;
        let product: Product = serde_json::from_str(raw).unwrap();

        assert_eq!(product.quantity(), 0);
        assert_eq!(product.min_stock(), 8);
        assert_eq!(product.barcode(), "7791234567890");
        assert_eq!(product.expiry_date(), "");
        assert_eq!(product.supplier(), "");
        assert_eq!(product.price(), Decimal::from(1500));
    }

    #[test]
    fn unreadable_stored_numbers_use_field_defaults() {
        let raw = r#"{"id": 3, "name": "Tea", "quantity": "lots", "minStock": null, "price": true}"#;
        let product: Product = serde_json::from_str(raw).unwrap();

        assert_eq!(product.quantity(), 0);
        assert_eq!(product.min_stock(), 5);
        assert_eq!(product.price(), Decimal::ZERO);
    }

    #[test]
    fn stored_zero_threshold_is_kept() {
        let product: Product =
            serde_json::from_str(r#"{"id": 4, "name": "Salt", "minStock": 0}"#).unwrap();
        assert_eq!(product.min_stock(), 0);
    }

    #[test]
    fn serialized_products_read_back_unchanged() {
        let product = Product::from_draft(
            test_id(),
            ProductDraft::new("Milk")
                .with_quantity(3)
                .with_min_stock(12)
                .with_price("950.5"),
        );
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn expiry_parses_dates_and_timestamps() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
        assert_eq!(parse_calendar_date("2025-10-28"), Some(date));
        assert_eq!(parse_calendar_date("2025-10-28T23:59:00Z"), Some(date));
        assert_eq!(parse_calendar_date("2025-10-28T08:00:00"), Some(date));
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("soon"), None);
        assert_eq!(parse_calendar_date("2025-02-30"), None);
    }

    #[test]
    fn stock_value_multiplies_quantity_by_price() {
        let product = Product::from_draft(
            test_id(),
            ProductDraft::new("Oil").with_quantity(8).with_price(2200),
        );
        assert_eq!(product.stock_value(), Decimal::from(17_600));
    }
}
