use serde::{Deserialize, Serialize};

/// Sibling ordering value as stored on a page
///
/// Listings carry either a JSON number or a string. Strings are coerced
/// the way a browser `parseFloat` does: leading whitespace is skipped and
/// the longest numeric prefix wins, so `"12abc"` is 12 and `"abc"` is
/// non-numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortPosition {
    Number(f64),
    Text(String),
}

impl SortPosition {
    /// Numeric value, None for non-numeric or non-finite positions
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SortPosition::Number(n) if n.is_finite() => Some(*n),
            SortPosition::Number(_) => None,
            SortPosition::Text(s) => parse_float_prefix(s),
        }
    }
}

impl From<f64> for SortPosition {
    fn from(value: f64) -> Self {
        SortPosition::Number(value)
    }
}

impl From<i64> for SortPosition {
    fn from(value: i64) -> Self {
        SortPosition::Number(value as f64)
    }
}

impl From<&str> for SortPosition {
    fn from(value: &str) -> Self {
        SortPosition::Text(value.to_string())
    }
}

impl From<String> for SortPosition {
    fn from(value: String) -> Self {
        SortPosition::Text(value)
    }
}

/// Parse the longest leading decimal literal of `s`
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        // parseFloat accepts it, but an infinite position cannot be ordered
        return None;
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("42"), Some(42.0));
        assert_eq!(parse_float_prefix("  -1.5"), Some(-1.5));
        assert_eq!(parse_float_prefix("12abc"), Some(12.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("2e3x"), Some(2000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("Infinity"), None);
    }

    #[test]
    fn test_position_deserializes_number_or_text() {
        let n: SortPosition = serde_json::from_str("200000").unwrap();
        assert_eq!(n.as_f64(), Some(200000.0));

        let t: SortPosition = serde_json::from_str("\"400000\"").unwrap();
        assert_eq!(t, SortPosition::Text("400000".to_string()));
        assert_eq!(t.as_f64(), Some(400000.0));

        let bad: SortPosition = serde_json::from_str("\"top\"").unwrap();
        assert_eq!(bad.as_f64(), None);
    }
}
