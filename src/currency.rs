//! Exchange-rate conversion and amount formatting.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

use crate::consts::DEFAULT_EXCHANGE_RATE;

/// Server currency units per display currency unit. Always finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub fn new(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            bail!("exchange rate must be a positive number, got {rate}");
        }
        Ok(Self(rate))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert an amount in server currency to display currency.
    pub fn to_display(self, amount: f64) -> f64 {
        amount / self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self(DEFAULT_EXCHANGE_RATE)
    }
}

impl FromStr for ExchangeRate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<f64>() {
            Ok(rate) => Self::new(rate),
            Err(_) => bail!("exchange rate must be a number, got {s:?}"),
        }
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read the leading number of a free-text value, ignoring what follows
/// (`"1000abc"` is 1000). Returns NaN when there is no numeric prefix.
pub fn parse_leading_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        if s[end..].starts_with("Infinity") {
            return match bytes.first() {
                Some(b'-') => f64::NEG_INFINITY,
                _ => f64::INFINITY,
            };
        }
        return f64::NAN;
    }

    // Optional exponent, only taken when it has at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
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

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Fixed two decimals without grouping, e.g. `200.00`.
pub fn format_fixed(n: f64) -> String {
    if !n.is_finite() {
        return non_finite(n);
    }
    format!("{n:.2}")
}

/// Thousands separators and exactly two decimals, e.g. `3,000.00`.
pub fn format_amount(n: f64) -> String {
    if !n.is_finite() {
        return non_finite(n);
    }
    let fixed = format!("{:.2}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if n < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Thousands separators with up to three decimals and no trailing zeros,
/// e.g. `1,000` or `1,234.5`. Used for amounts echoed back as typed.
pub fn format_grouped(n: f64) -> String {
    if !n.is_finite() {
        return non_finite(n);
    }
    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    let sign = if n < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    let grouped = group_thousands(int_part);
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn non_finite(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(r: f64) -> ExchangeRate {
        ExchangeRate::new(r).unwrap()
    }

    #[test]
    fn default_rate_is_28() {
        assert_eq!(ExchangeRate::default().value(), 28.0);
    }

    #[test]
    fn monthly_5600_is_200() {
        let usd = rate(28.0).to_display(5600.0);
        assert_eq!(format_fixed(usd), "200.00");
    }

    #[test]
    fn rejects_non_positive_rates() {
        assert!(ExchangeRate::new(0.0).is_err());
        assert!(ExchangeRate::new(-3.0).is_err());
        assert!(ExchangeRate::new(f64::NAN).is_err());
        assert!(ExchangeRate::new(f64::INFINITY).is_err());
    }

    #[test]
    fn rate_from_str() {
        assert_eq!("30".parse::<ExchangeRate>().unwrap().value(), 30.0);
        assert_eq!(" 27.5 ".parse::<ExchangeRate>().unwrap().value(), 27.5);
        assert!("abc".parse::<ExchangeRate>().is_err());
        assert!("0".parse::<ExchangeRate>().is_err());
    }

    #[test]
    fn format_amount_groups_and_rounds() {
        assert_eq!(format_amount(84000.0 / 28.0), "3,000.00");
        assert_eq!(format_amount(16000.0 / 28.0), "571.43");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
    }

    #[test]
    fn format_amount_negative() {
        assert_eq!(format_amount(-1234.5), "-1,234.50");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn format_amount_non_finite() {
        assert_eq!(format_amount(f64::NAN), "NaN");
        assert_eq!(format_amount(f64::INFINITY), "∞");
        assert_eq!(format_amount(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn format_fixed_has_no_grouping() {
        assert_eq!(format_fixed(12345.678), "12345.68");
        assert_eq!(format_fixed(f64::NAN), "NaN");
    }

    #[test]
    fn format_grouped_trims_trailing_zeros() {
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(1234.5), "1,234.5");
        assert_eq!(format_grouped(0.1234), "0.123");
        assert_eq!(format_grouped(-2500.0), "-2,500");
    }

    #[test]
    fn leading_number_plain() {
        assert_eq!(parse_leading_number("1000"), 1000.0);
        assert_eq!(parse_leading_number("  12.5"), 12.5);
        assert_eq!(parse_leading_number("-7"), -7.0);
        assert_eq!(parse_leading_number(".5"), 0.5);
        assert_eq!(parse_leading_number("1e3"), 1000.0);
    }

    #[test]
    fn leading_number_ignores_trailing_text() {
        assert_eq!(parse_leading_number("1000abc"), 1000.0);
        assert_eq!(parse_leading_number("3.14.15"), 3.14);
        assert_eq!(parse_leading_number("2e"), 2.0);
        assert_eq!(parse_leading_number("1,000"), 1.0);
    }

    #[test]
    fn leading_number_nan_without_digits() {
        assert!(parse_leading_number("").is_nan());
        assert!(parse_leading_number("abc").is_nan());
        assert!(parse_leading_number("-").is_nan());
        assert!(parse_leading_number(".").is_nan());
    }

    #[test]
    fn leading_number_infinity() {
        assert_eq!(parse_leading_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_leading_number("-Infinity"), f64::NEG_INFINITY);
    }
}
