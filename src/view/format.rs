//! Number formatting for metric slots

/// `numerator / denominator` as a percentage; 0.0 when the denominator is 0.
pub fn rate(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

/// Percentage with one decimal place, or a bare `0` when nothing was sent.
///
/// Ties round away from zero (`0.25` shows as `0.3`).
pub fn format_rate(numerator: u64, denominator: u64) -> String {
    if denominator == 0 {
        return "0".to_string();
    }
    let tenths = (rate(numerator, denominator) * 10.0).round() / 10.0;
    format!("{:.1}", tenths)
}

/// Count with thousands separators: `1234567` becomes `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with separators. Negative or non-finite values show as `$0`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "$0".to_string();
    }
    format!("${}", format_count(value.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_never_divides() {
        assert_eq!(rate(5, 0), 0.0);
        assert_eq!(format_rate(0, 0), "0");
        assert_eq!(format_rate(7, 0), "0");
    }

    #[test]
    fn rates_have_one_decimal() {
        assert_eq!(format_rate(1, 8), "12.5");
        assert_eq!(format_rate(50, 200), "25.0");
        assert_eq!(format_rate(1, 3), "33.3");
    }

    #[test]
    fn rate_ties_round_up() {
        assert_eq!(format_rate(1, 400), "0.3");
        assert_eq!(format_rate(5, 400), "1.3");
        assert_eq!(format_rate(3, 400), "0.8");
        assert_eq!(format_rate(2, 3), "66.7");
    }

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_234), "1,234");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn currency_rounds_to_whole_dollars() {
        assert_eq!(format_currency(12_500.4), "$12,500");
        assert_eq!(format_currency(f64::NAN), "$0");
    }
}
