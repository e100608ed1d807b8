//! Numeric parsing and rendering for text fields.
//!
//! Values are read the way they were written by hand or by a spreadsheet
//! export: surrounding whitespace is ignored, but thousands separators and
//! non-finite values are not accepted.

/// Parse a finite floating point value.
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a signed integer value.
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Round to `decimals` places and render with trailing zeros removed,
/// keeping at least one fractional digit (`14.0`, `12.3457`).
pub fn format_rounded(value: f64, decimals: usize) -> String {
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0');
        let keep = if trimmed.ends_with('.') {
            trimmed.len() + 1
        } else {
            trimmed.len()
        };
        text.truncate(keep);
    } else {
        text.push_str(".0");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("-65.7383"), Some(-65.7383));
        assert_eq!(parse_float("  27  "), Some(27.0));
        assert_eq!(parse_float("1e2"), Some(100.0));
    }

    #[test]
    fn test_parse_float_rejects() {
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("1,234"), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("390"), Some(390));
        assert_eq!(parse_int(" -4 "), Some(-4));
        assert_eq!(parse_int("3.5"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_format_rounded_trims_zeros() {
        assert_eq!(format_rounded(12.345_67, 4), "12.3457");
        assert_eq!(format_rounded(12.5, 4), "12.5");
        assert_eq!(format_rounded(-64.1, 4), "-64.1");
    }

    #[test]
    fn test_format_rounded_keeps_one_decimal() {
        assert_eq!(format_rounded(14.0, 1), "14.0");
        assert_eq!(format_rounded(27.96, 1), "28.0");
        assert_eq!(format_rounded(3.0, 0), "3.0");
    }
}
