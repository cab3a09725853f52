//! Symbology detection by shape.

use core::fmt;
use core::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarcodeFormat {
    Ean13,
    Ean8,
    UpcA,
    Code128,
    Code39,
    Unknown,
}

impl BarcodeFormat {
    pub fn name(self) -> &'static str {
        match self {
            BarcodeFormat::Ean13 => "EAN-13",
            BarcodeFormat::Ean8 => "EAN-8",
            BarcodeFormat::UpcA => "UPC-A",
            BarcodeFormat::Code128 => "Code-128",
            BarcodeFormat::Code39 => "Code-39",
            BarcodeFormat::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown barcode format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for BarcodeFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "EAN13" => Ok(BarcodeFormat::Ean13),
            "EAN8" => Ok(BarcodeFormat::Ean8),
            "UPCA" | "UPC" => Ok(BarcodeFormat::UpcA),
            "CODE128" => Ok(BarcodeFormat::Code128),
            "CODE39" => Ok(BarcodeFormat::Code39),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Result of a shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatCheck {
    pub valid: bool,
    pub format: BarcodeFormat,
}

// Checked in declaration order; the first match wins. Code-128 accepts a
// superset of most Code-39 input, so Code-39 only wins for codes with a space
// or a `$`.
static PATTERNS: Lazy<Vec<(BarcodeFormat, Regex)>> = Lazy::new(|| {
    [
        (BarcodeFormat::Ean13, r"^[0-9]{13}$"),
        (BarcodeFormat::Ean8, r"^[0-9]{8}$"),
        (BarcodeFormat::UpcA, r"^[0-9]{12}$"),
        (BarcodeFormat::Code128, r"^[0-9A-Za-z\-./+%]+$"),
        (BarcodeFormat::Code39, r"^[0-9A-Z\-. $/+%]+$"),
    ]
    .into_iter()
    .filter_map(|(format, pattern)| Regex::new(pattern).ok().map(|re| (format, re)))
    .collect()
});

/// Classify a code by the first symbology whose shape it matches.
pub fn validate_barcode_format(code: &str) -> FormatCheck {
    PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(code))
        .map(|(format, _)| FormatCheck {
            valid: true,
            format: *format,
        })
        .unwrap_or(FormatCheck {
            valid: false,
            format: BarcodeFormat::Unknown,
        })
}

/// Loose retail check: 8 to 13 digits.
pub fn is_plausible_barcode(code: &str) -> bool {
    (8..=13).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_of(code: &str) -> BarcodeFormat {
        validate_barcode_format(code).format
    }

    #[test]
    fn all_patterns_compile() {
        assert_eq!(PATTERNS.len(), 5);
    }

    #[test]
    fn detects_numeric_symbologies_by_length() {
        assert_eq!(format_of("7790895000015"), BarcodeFormat::Ean13);
        assert_eq!(format_of("96385074"), BarcodeFormat::Ean8);
        assert_eq!(format_of("779012345678"), BarcodeFormat::UpcA);
    }

    #[test]
    fn other_digit_lengths_fall_through_to_code_128() {
        assert_eq!(format_of("12345"), BarcodeFormat::Code128);
    }

    #[test]
    fn alphanumeric_codes_are_code_128() {
        assert_eq!(format_of("ABC-123/x"), BarcodeFormat::Code128);
    }

    #[test]
    fn space_or_dollar_selects_code_39() {
        assert_eq!(format_of("ABC 123"), BarcodeFormat::Code39);
        assert_eq!(format_of("PRICE$5"), BarcodeFormat::Code39);
    }

    #[test]
    fn unmatched_codes_are_unknown() {
        let check = validate_barcode_format("abc 123");
        assert!(!check.valid);
        assert_eq!(check.format, BarcodeFormat::Unknown);
        assert_eq!(check.format.to_string(), "Unknown");
        assert!(!validate_barcode_format("").valid);
    }

    #[test]
    fn plausible_barcodes_are_eight_to_thirteen_digits() {
        assert!(is_plausible_barcode("12345678"));
        assert!(is_plausible_barcode("7790895000015"));
        assert!(!is_plausible_barcode("1234567"));
        assert!(!is_plausible_barcode("77908950000150"));
        assert!(!is_plausible_barcode("1234567A"));
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("EAN-13".parse::<BarcodeFormat>().unwrap(), BarcodeFormat::Ean13);
        assert_eq!("upc-a".parse::<BarcodeFormat>().unwrap(), BarcodeFormat::UpcA);
        assert_eq!("code_128".parse::<BarcodeFormat>().unwrap(), BarcodeFormat::Code128);
        assert!("qr".parse::<BarcodeFormat>().is_err());
    }
}
