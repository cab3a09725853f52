//! GS1 prefix to country lookup.
//!
//! The table mixes two-digit and three-digit prefixes. Range rules compare the
//! numeric value of the *three*-character prefix against bounds written with
//! two digits, so `30-37` only matches `030`..`037`, not `300`..`379`. This is
//! a best-effort lookup kept as-is, not an authoritative GS1 registry.

pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const OTHER_COUNTRY: &str = "Other country";

#[derive(Debug, Clone, Copy)]
enum PrefixRule {
    /// The prefix starts with this text.
    Starts(&'static str),
    /// The prefix, read as a number, falls in this inclusive range.
    Range(u32, u32),
}

impl PrefixRule {
    fn matches(self, prefix: &str) -> bool {
        match self {
            PrefixRule::Starts(lead) => prefix.starts_with(lead),
            PrefixRule::Range(start, end) => {
                leading_number(prefix).is_some_and(|n| (start..=end).contains(&n))
            }
        }
    }
}

const COUNTRY_TABLE: &[(PrefixRule, &str)] = &[
    (PrefixRule::Starts("779"), "Argentina"),
    (PrefixRule::Starts("780"), "Chile"),
    (PrefixRule::Starts("850"), "Cuba"),
    (PrefixRule::Range(0, 9), "United States/Canada"),
    (PrefixRule::Range(30, 37), "France"),
    (PrefixRule::Range(40, 44), "Germany"),
    (PrefixRule::Starts("50"), "United Kingdom"),
    (PrefixRule::Range(690, 699), "China"),
    (PrefixRule::Range(80, 83), "Italy"),
    (PrefixRule::Starts("84"), "Spain"),
    (PrefixRule::Starts("87"), "Netherlands"),
    (PrefixRule::Range(90, 91), "Austria"),
];

fn leading_number(prefix: &str) -> Option<u32> {
    let digits: String = prefix.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Country for the first three characters of `code`, first table match wins.
pub fn country_from_barcode(code: &str) -> &'static str {
    if code.chars().count() < 3 {
        return UNKNOWN_COUNTRY;
    }
    let prefix: String = code.chars().take(3).collect();

    COUNTRY_TABLE
        .iter()
        .find(|(rule, _)| rule.matches(&prefix))
        .map(|(_, country)| *country)
        .unwrap_or(OTHER_COUNTRY)
}
