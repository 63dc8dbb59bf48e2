//! Number formatting helpers for reports

/// Two-decimal value with thousands separators: `1234567.891` -> `1,234,567.89`
pub fn with_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Hours with one decimal
pub fn hours(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0.0), "0.00");
        assert_eq!(with_thousands(999.5), "999.50");
        assert_eq!(with_thousands(1000.0), "1,000.00");
        assert_eq!(with_thousands(1_234_567.891), "1,234,567.89");
        assert_eq!(with_thousands(300_000.0), "300,000.00");
        assert_eq!(with_thousands(-12_345.0), "-12,345.00");
    }

    #[test]
    fn test_hours() {
        assert_eq!(hours(2.0), "2.0");
        assert_eq!(hours(71.96), "72.0");
    }
}
