//! Products domain module.
//!
//! This crate contains the product entity and its input coercion rules,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod coerce;
pub mod demo;
pub mod product;
pub mod query;
mod stored;

pub use coerce::NumericInput;
pub use demo::demo_products;
pub use product::{Product, ProductDraft, ProductPatch};
pub use query::{SortKey, SortOrder, search_products, sort_products};
