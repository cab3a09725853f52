//! Search and ordering helpers over a product list.
//!
//! These never touch persisted order; callers sort their own copies.

use core::cmp::Ordering;
use core::str::FromStr;

use stocktrack_core::DomainError;

use crate::product::Product;

/// Substring match of the lowercased term against the lowercased name and
/// supplier, and against the barcode as stored.
///
/// The term is not trimmed. An empty term matches everything; a barcode with
/// uppercase letters only matches a term without them.
pub fn search_products(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();

    products
        .iter()
        .filter(|p| {
            p.name().to_lowercase().contains(&needle)
                || p.barcode().contains(&needle)
                || p.supplier().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Barcode,
    Quantity,
    MinStock,
    ExpiryDate,
    Supplier,
    Price,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "name" => Ok(Self::Name),
            "barcode" => Ok(Self::Barcode),
            "quantity" => Ok(Self::Quantity),
            "min_stock" | "minstock" => Ok(Self::MinStock),
            "expiry_date" | "expirydate" | "expiry" => Ok(Self::ExpiryDate),
            "supplier" => Ok(Self::Supplier),
            "price" => Ok(Self::Price),
            other => Err(DomainError::validation(format!("unknown sort key: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(DomainError::validation(format!("unknown sort order: {other}"))),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_by(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::Name => compare_text(a.name(), b.name()),
        SortKey::Barcode => compare_text(a.barcode(), b.barcode()),
        SortKey::Quantity => a.quantity().cmp(&b.quantity()),
        SortKey::MinStock => a.min_stock().cmp(&b.min_stock()),
        // ISO dates order correctly as text.
        SortKey::ExpiryDate => compare_text(a.expiry_date(), b.expiry_date()),
        SortKey::Supplier => compare_text(a.supplier(), b.supplier()),
        SortKey::Price => a.price().cmp(&b.price()),
    }
}

/// Stable in-place sort.
pub fn sort_products(products: &mut [Product], key: SortKey, order: SortOrder) {
    products.sort_by(|a, b| {
        let ordering = compare_by(key, a, b);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_products;
    use crate::product::ProductDraft;
    use stocktrack_core::ProductId;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(Product::name).collect()
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let found = search_products(&demo_products(), "LECHE");
        assert_eq!(names(&found), vec!["Leche La Serenísima 1L"]);
    }

    #[test]
    fn search_matches_supplier_and_barcode() {
        let products = demo_products();
        assert_eq!(search_products(&products, "mayorista").len(), 2);
        assert_eq!(names(&search_products(&products, "7798027")), vec!["Aceite Cocinero 900ml"]);
    }

    #[test]
    fn empty_search_returns_everything() {
        assert_eq!(search_products(&demo_products(), "").len(), 5);
    }

    #[test]
    fn search_term_is_lowercased_but_not_trimmed() {
        let products = vec![
            Product::from_draft(ProductId::new(1), ProductDraft::new("Tea").with_barcode("sku-12")),
            Product::from_draft(ProductId::new(2), ProductDraft::new("Jam").with_barcode("SKU-34")),
        ];

        assert_eq!(names(&search_products(&products, "SKU")), vec!["Tea"]);
        assert!(search_products(&products, " tea").is_empty());
        assert!(search_products(&demo_products(), "  ").is_empty());
    }

    #[test]
    fn sorts_by_quantity_descending() {
        let mut products = demo_products();
        sort_products(&mut products, SortKey::Quantity, SortOrder::Descending);
        let quantities: Vec<u64> = products.iter().map(Product::quantity).collect();
        assert_eq!(quantities, vec![20, 12, 8, 5, 3]);
    }

    #[test]
    fn sorts_by_name_ascending() {
        let mut products = demo_products();
        sort_products(&mut products, SortKey::Name, SortOrder::Ascending);
        assert_eq!(products[0].name(), "Aceite Cocinero 900ml");
        assert_eq!(products[4].name(), "Leche La Serenísima 1L");
    }

    #[test]
    fn parses_sort_keys() {
        assert_eq!("min-stock".parse::<SortKey>().unwrap(), SortKey::MinStock);
        assert_eq!("expiryDate".parse::<SortKey>().unwrap(), SortKey::ExpiryDate);
        assert!("colour".parse::<SortKey>().is_err());
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Descending);
    }
}
