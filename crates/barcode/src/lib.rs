//! Barcode utilities: symbology detection, EAN-13 check digits, GS1 country
//! prefixes and scan de-duplication.
//!
//! Everything here is stateless apart from [`ScanDebouncer`], which holds only
//! the last accepted code.

pub mod country;
pub mod ean13;
pub mod format;
pub mod generate;
pub mod scan;

pub use country::{OTHER_COUNTRY, UNKNOWN_COUNTRY, country_from_barcode};
pub use ean13::{calculate_ean13_check_digit, is_valid_ean13};
pub use format::{BarcodeFormat, FormatCheck, UnknownFormat, is_plausible_barcode, validate_barcode_format};
pub use generate::{PLACEHOLDER_BARCODE, generate_random_barcode, generate_random_barcode_with};
pub use scan::ScanDebouncer;
