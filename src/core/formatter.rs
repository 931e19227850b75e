use super::sanitizer::sanitize_folder_name;

const INTEGER_TOLERANCE: f64 = 1e-9;
const SIGNIFICANT_DIGITS: usize = 12;

/// Formats a CSV cell as a folder name, or `None` when the cell is missing,
/// not numeric, not finite, or below `threshold`.
pub fn format_value(cell: Option<&str>, threshold: f64, max_len: usize) -> Option<String> {
    let num: f64 = cell?.trim().parse().ok()?;
    if !num.is_finite() || num < threshold {
        return None;
    }
    // + 0.0 turns -0.0 into 0.0
    let rounded = num.round() + 0.0;
    let text = if (num - rounded).abs() <= INTEGER_TOLERANCE {
        format!("{:.0}", rounded)
    } else {
        format_significant(num, SIGNIFICANT_DIGITS)
    };
    Some(sanitize_folder_name(&text, max_len))
}

/// `%.Ng` style rendering: N significant digits, trailing zeros dropped,
/// scientific notation for very small or very large exponents.
pub fn format_significant(num: f64, digits: usize) -> String {
    if num == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);
    // Exponent after rounding to `digits` significant digits.
    let sci = format!("{:.*e}", digits - 1, num);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if exp < -4 || exp >= digits as i32 {
        let mantissa = trim_fraction(mantissa);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, num)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(cell: &str) -> Option<String> {
        format_value(Some(cell), 300.0, 200)
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(fmt("300.0").as_deref(), Some("300"));
        assert_eq!(fmt("300").as_deref(), Some("300"));
        assert_eq!(fmt("299.999"), None);
        assert_eq!(fmt("-500"), None);
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(fmt("450.25").as_deref(), Some("450.25"));
        assert_eq!(fmt("1234.5678901234567").as_deref(), Some("1234.56789012"));
    }

    #[test]
    fn test_near_integer() {
        assert_eq!(fmt("300.0000000001").as_deref(), Some("300"));
        assert_eq!(fmt(" 1000 ").as_deref(), Some("1000"));
        assert_eq!(fmt("1e20").as_deref(), Some("100000000000000000000"));
    }

    #[test]
    fn test_negative_zero_renders_as_zero() {
        assert_eq!(format_value(Some("-0.0000000001"), -10.0, 200).as_deref(), Some("0"));
        assert_eq!(format_value(Some("-0.0"), -10.0, 200).as_deref(), Some("0"));
        assert_eq!(format_value(Some("-5"), -10.0, 200).as_deref(), Some("-5"));
    }

    #[test]
    fn test_missing_or_non_numeric() {
        assert_eq!(format_value(None, 300.0, 200), None);
        assert_eq!(fmt(""), None);
        assert_eq!(fmt("abc"), None);
        assert_eq!(fmt("NaN"), None);
        assert_eq!(fmt("inf"), None);
    }

    #[test]
    fn test_format_significant() {
        assert_eq!(format_significant(450.25, 12), "450.25");
        assert_eq!(format_significant(0.1 + 0.2, 12), "0.3");
        assert_eq!(format_significant(1.5e15, 12), "1.5e+15");
        assert_eq!(format_significant(0.00001234, 12), "1.234e-05");
        assert_eq!(format_significant(0.0001234, 12), "0.0001234");
        assert_eq!(format_significant(0.0, 12), "0");
    }
}
