//! Result and amount formatting
//!
//! Results shrink with magnitude: grouped digits below 100,000, then
//! Lakh/Crore for rupees and K/M/B/T for everything else. The amount field
//! keeps full precision and is only grouped.

use super::conversion::{parse_amount, Conversion};

/// Values at or above this magnitude are compacted.
pub const COMPACT_THRESHOLD: f64 = 100_000.0;
const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

const RESULT_FRACTION_DIGITS: usize = 2;
const INPUT_FRACTION_DIGITS: usize = 10;

const COMPACT_SUFFIXES: [(f64, &str); 4] = [
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

/// Digit grouping convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// 1,234,567
    Standard,
    /// 12,34,567
    Indian,
}

impl Grouping {
    pub fn for_unit(unit_code: &str) -> Self {
        if unit_code == "INR" {
            Grouping::Indian
        } else {
            Grouping::Standard
        }
    }
}

/// Inserts separators into a string of ASCII digits.
fn group_digits(digits: &str, grouping: Grouping) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 2);
    for (i, ch) in digits.chars().enumerate() {
        let remaining = len - i;
        let boundary = match grouping {
            Grouping::Standard => remaining % 3 == 0,
            Grouping::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
        };
        if i > 0 && boundary {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Grouped number with at most `max_fraction` digits and no trailing zeros.
/// Halfway cases round away from zero.
pub fn format_grouped(value: f64, max_fraction: usize, grouping: Grouping) -> String {
    let fixed = format!("{:.*}", max_fraction, round_to(value, max_fraction).abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let is_zero = integer.bytes().all(|b| b == b'0') && fraction.is_empty();
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(integer, grouping));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Short-scale compact notation: 150000 -> "150K", 1234567 -> "1.23M".
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    let mut tier = COMPACT_SUFFIXES
        .iter()
        .rposition(|(scale, _)| magnitude >= *scale)
        .unwrap_or(0);

    // 999,999 rounds to 1000K; promote it to 1M
    let mut scaled = round_to(magnitude / COMPACT_SUFFIXES[tier].0, RESULT_FRACTION_DIGITS);
    if scaled >= 1000.0 && tier + 1 < COMPACT_SUFFIXES.len() {
        tier += 1;
        scaled = round_to(magnitude / COMPACT_SUFFIXES[tier].0, RESULT_FRACTION_DIGITS);
    }

    let signed = if value.is_sign_negative() { -scaled } else { scaled };
    let mut number = format_grouped(signed, RESULT_FRACTION_DIGITS, Grouping::Standard);
    // Separators only from five integer digits up: "1000T", "15,000T"
    if scaled < 10_000.0 {
        number.retain(|c| c != ',');
    }
    format!("{}{}", number, COMPACT_SUFFIXES[tier].1)
}

/// `f64::round` goes away from zero on ties, unlike `{:.N}` formatting.
fn round_to(value: f64, digits: usize) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Display string for a converted value in `unit_code`.
pub fn format_result(value: f64, unit_code: &str) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let grouping = Grouping::for_unit(unit_code);
    if value.abs() < COMPACT_THRESHOLD {
        return format_grouped(value, RESULT_FRACTION_DIGITS, grouping);
    }

    match grouping {
        // Signed comparisons: large negative rupee amounts use the grouped fallback
        Grouping::Indian if value >= CRORE => format!("{:.2} Cr", round_to(value / CRORE, 2)),
        Grouping::Indian if value >= LAKH => format!("{:.2} L", round_to(value / LAKH, 2)),
        Grouping::Standard => format_compact(value),
        _ => format_grouped(value, RESULT_FRACTION_DIGITS, grouping),
    }
}

/// Display string for a conversion outcome; unavailable results show `"0"`.
pub fn format_conversion(conversion: Conversion, unit_code: &str) -> String {
    match conversion {
        Conversion::Value(value) => format_result(value, unit_code),
        Conversion::Unavailable => "0".to_string(),
    }
}

/// Display string for the amount field while the user edits it.
///
/// Grouping only, never compacted. A trailing `.` or trailing fractional
/// zeros are kept so the user can keep typing; unparseable text comes back
/// unchanged.
pub fn format_amount_input(text: &str, unit_code: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let grouping = Grouping::for_unit(unit_code);
    let cleaned = text.replace(',', "");

    let value = match parse_amount(&cleaned) {
        Ok(value) => value,
        Err(_) => return text.to_string(),
    };

    match cleaned.split_once('.') {
        Some((integer, fraction))
            if fraction.len() <= INPUT_FRACTION_DIGITS
                && integer.bytes().all(|b| b.is_ascii_digit())
                && fraction.bytes().all(|b| b.is_ascii_digit()) =>
        {
            let integer = integer.trim_start_matches('0');
            let integer = if integer.is_empty() { "0" } else { integer };
            format!("{}.{}", group_digits(integer, grouping), fraction)
        }
        _ => format_grouped(value, INPUT_FRACTION_DIGITS, grouping),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_are_grouped() {
        assert_eq!(format_result(99_999.0, "USD"), "99,999");
        assert_eq!(format_result(1234.5678, "EUR"), "1,234.57");
        assert_eq!(format_result(12.5, "kg"), "12.5");
        assert_eq!(format_result(0.0, "m"), "0");
        assert_eq!(format_result(-4321.0, "USD"), "-4,321");
    }

    #[test]
    fn test_tiny_values_round_to_zero() {
        assert_eq!(format_result(0.001, "nm"), "0");
        assert_eq!(format_result(-0.001, "nm"), "0");
    }

    #[test]
    fn test_indian_grouping_below_threshold() {
        assert_eq!(format_result(99_999.5, "INR"), "99,999.5");
        assert_eq!(format_grouped(100_000.0, 2, Grouping::Indian), "1,00,000");
        assert_eq!(format_grouped(12_345_678.0, 2, Grouping::Indian), "1,23,45,678");
    }

    #[test]
    fn test_compact_standard() {
        assert_eq!(format_result(150_000.0, "USD"), "150K");
        assert_eq!(format_result(1_234_567.0, "EUR"), "1.23M");
        assert_eq!(format_result(2_500_000_000.0, "m"), "2.5B");
        assert_eq!(format_result(7.1e12, "USD"), "7.1T");
        assert_eq!(format_result(-150_000.0, "USD"), "-150K");
    }

    #[test]
    fn test_compact_promotes_rounded_tier() {
        assert_eq!(format_result(999_999.0, "USD"), "1M");
        assert_eq!(format_result(100_000.0, "USD"), "100K");
    }

    #[test]
    fn test_compact_beyond_trillions() {
        assert_eq!(format_result(1e15, "m"), "1000T");
        assert_eq!(format_result(1.5e16, "m"), "15,000T");
        assert_eq!(format_result(1.5e18, "m"), "1,500,000T");
        assert_eq!(format_result(-1e15, "USD"), "-1000T");
    }

    #[test]
    fn test_halfway_values_round_up() {
        assert_eq!(format_result(0.125, "USD"), "0.13");
        assert_eq!(format_result(-0.125, "USD"), "-0.13");
        assert_eq!(format_result(112_500.0, "INR"), "1.13 L");
        assert_eq!(format_result(11_250_000.0, "INR"), "1.13 Cr");
        assert_eq!(format_grouped(2.5, 0, Grouping::Standard), "3");
    }

    #[test]
    fn test_lakh_and_crore() {
        assert_eq!(format_result(15_000_000.0, "INR"), "1.50 Cr");
        assert_eq!(format_result(250_000.0, "INR"), "2.50 L");
        assert_eq!(format_result(100_000.0, "INR"), "1.00 L");
    }

    #[test]
    fn test_negative_rupees_fall_back_to_grouping() {
        assert_eq!(format_result(-250_000.0, "INR"), "-2,50,000");
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(format_result(f64::NAN, "USD"), "0");
        assert_eq!(format_result(f64::INFINITY, "INR"), "0");
        assert_eq!(format_conversion(Conversion::Unavailable, "USD"), "0");
        assert_eq!(format_conversion(Conversion::Value(90.0), "EUR"), "90");
    }

    #[test]
    fn test_amount_input_grouping() {
        assert_eq!(format_amount_input("1234567", "USD"), "1,234,567");
        assert_eq!(format_amount_input("1234567", "INR"), "12,34,567");
        assert_eq!(format_amount_input("1,234", "USD"), "1,234");
        assert_eq!(format_amount_input("", "USD"), "");
    }

    #[test]
    fn test_amount_input_keeps_edit_state() {
        assert_eq!(format_amount_input("1500.", "USD"), "1,500.");
        assert_eq!(format_amount_input("0.50", "USD"), "0.50");
        assert_eq!(format_amount_input(".5", "USD"), "0.5");
        assert_eq!(format_amount_input("007", "USD"), "7");
    }

    #[test]
    fn test_amount_input_precision() {
        assert_eq!(format_amount_input("0.123456789012", "USD"), "0.123456789");
        assert_eq!(format_amount_input(".", "USD"), ".");
    }
}
