//! EAN-13 check digit arithmetic.

fn digits(code: &str) -> Option<Vec<u32>> {
    code.chars().map(|c| c.to_digit(10)).collect()
}

/// Check digit for a 12-digit EAN-13 body.
///
/// Weights alternate 1, 3, 1, 3, ... from the left. Returns `None` unless the
/// input is exactly twelve ASCII digits.
pub fn calculate_ean13_check_digit(code: &str) -> Option<u8> {
    if code.len() != 12 {
        return None;
    }
    let digits = digits(code)?;

    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();

    u8::try_from((10 - sum % 10) % 10).ok()
}

/// True when `code` is thirteen digits whose last digit is the correct check digit.
pub fn is_valid_ean13(code: &str) -> bool {
    if code.len() != 13 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (body, check) = code.split_at(12);
    let provided = check.chars().next().and_then(|c| c.to_digit(10));

    match (calculate_ean13_check_digit(body), provided) {
        (Some(expected), Some(provided)) => u32::from(expected) == provided,
        _ => false,
    }
}
