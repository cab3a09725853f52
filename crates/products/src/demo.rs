//! Demo catalogue used to seed an empty store on first use.

use stocktrack_core::ProductId;

use crate::product::{Product, ProductDraft};

/// The five starter products, with fixed ids `1..=5`.
pub fn demo_products() -> Vec<Product> {
    let drafts = [
        ProductDraft::new("Coca-Cola 2.25L")
            .with_barcode("7790895000015")
            .with_quantity(12)
            .with_min_stock(10)
            .with_expiry_date("2025-12-31")
            .with_supplier("Distribuidora Sur")
            .with_price(1500),
        ProductDraft::new("Fideos Matarazzo 500g")
            .with_barcode("7790042001234")
            .with_quantity(5)
            .with_min_stock(15)
            .with_expiry_date("2025-11-15")
            .with_supplier("Mayorista Central")
            .with_price(800),
        ProductDraft::new("Aceite Cocinero 900ml")
            .with_barcode("7798027564123")
            .with_quantity(8)
            .with_min_stock(8)
            .with_expiry_date("2026-03-20")
            .with_supplier("Distribuidora Sur")
            .with_price(2200),
        ProductDraft::new("Leche La Serenísima 1L")
            .with_barcode("7790315001456")
            .with_quantity(3)
            .with_min_stock(12)
            .with_expiry_date("2025-10-28")
            .with_supplier("Lácteos Express")
            .with_price(950),
        ProductDraft::new("Arroz Gallo Oro 1kg")
            .with_barcode("779012345678")
            .with_quantity(20)
            .with_min_stock(10)
            .with_expiry_date("2026-06-30")
            .with_supplier("Mayorista Central")
            .with_price(1200),
    ];

    drafts
        .into_iter()
        .zip(1..)
        .map(|(draft, id)| Product::from_draft(ProductId::new(id), draft))
        .collect()
}
