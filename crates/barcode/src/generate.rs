//! Synthetic barcodes for demos and tests.

use rand::Rng;

use crate::ean13::calculate_ean13_check_digit;
use crate::format::BarcodeFormat;

/// Returned for every symbology other than EAN-13.
pub const PLACEHOLDER_BARCODE: &str = "0000000000000";

const GENERATED_PREFIX: &str = "779";

/// Random, checksum-valid EAN-13 under the `779` prefix.
pub fn generate_random_barcode(format: BarcodeFormat) -> String {
    generate_random_barcode_with(&mut rand::thread_rng(), format)
}

pub fn generate_random_barcode_with<R: Rng>(rng: &mut R, format: BarcodeFormat) -> String {
    if format != BarcodeFormat::Ean13 {
        return PLACEHOLDER_BARCODE.to_string();
    }

    let mut body = String::with_capacity(13);
    body.push_str(GENERATED_PREFIX);
    for _ in 0..9 {
        let digit: u32 = rng.gen_range(0..10);
        body.extend(char::from_digit(digit, 10));
    }

    match calculate_ean13_check_digit(&body) {
        Some(check) => format!("{body}{check}"),
        None => PLACEHOLDER_BARCODE.to_string(),
    }
}
