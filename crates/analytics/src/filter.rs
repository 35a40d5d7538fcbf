//! Geography filters and input defaults
//!
//! Every analytical view is scoped to a city or a country. Absent or blank
//! selections fall back to documented defaults rather than failing, so a
//! half-filled filter control still produces a chart.

/// Default city when no selection was made
pub const DEFAULT_CITY: &str = "Paris";

/// Default country when no selection was made
pub const DEFAULT_COUNTRY: &str = "France";

/// Default lookback window in years
pub const DEFAULT_LOOKBACK_YEARS: u32 = 5;

/// Upper bound on the lookback window
pub const MAX_LOOKBACK_YEARS: u32 = 30;

/// Substitute the default city for a missing or blank selection
pub fn city_or_default(input: &str) -> String {
    or_default(input.to_string(), DEFAULT_CITY)
}

/// Substitute the default country for a missing or blank selection
pub fn country_or_default(input: &str) -> String {
    or_default(input.to_string(), DEFAULT_COUNTRY)
}

/// Resolve a lookback window: missing or zero becomes the default, and the
/// window is capped at [`MAX_LOOKBACK_YEARS`]
pub fn lookback_or_default(years: Option<u32>) -> u32 {
    match years {
        None | Some(0) => DEFAULT_LOOKBACK_YEARS,
        Some(y) => y.min(MAX_LOOKBACK_YEARS),
    }
}

fn or_default(input: String, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_default() {
        assert_eq!(city_or_default(""), "Paris");
        assert_eq!(city_or_default("  "), "Paris");
        assert_eq!(city_or_default("Brooklyn"), "Brooklyn");
        assert_eq!(city_or_default(" London "), "London");
    }

    #[test]
    fn test_country_default() {
        assert_eq!(country_or_default(""), "France");
        assert_eq!(country_or_default("Portugal"), "Portugal");
    }

    #[test]
    fn test_lookback_defaults() {
        assert_eq!(lookback_or_default(None), 5);
        assert_eq!(lookback_or_default(Some(0)), 5);
        assert_eq!(lookback_or_default(Some(8)), 8);
        assert_eq!(lookback_or_default(Some(100)), 30);
    }
}
