//! German number and date formats as used by Sparkasse, Commerzbank and
//! Volksbank CSV exports.
//!
//! Amounts use a dot as thousands separator and a comma as decimal separator
//! (`1.234,56`). Dates are `dd.mm.yyyy`, some exports shorten the year to two
//! digits (`dd.mm.yy`).

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;
use std::str::FromStr;

/// Output pattern for all dates, whatever pattern they were read with
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Accepted input patterns in lookup order, keyed by the digit count of the year part
const DATE_PATTERNS: [(&str, usize); 2] = [("%d.%m.%Y", 4), ("%d.%m.%y", 2)];

/// Parse a German formatted amount into an exact decimal.
///
/// Empty or unparseable text yields zero. Callers cannot tell a literal
/// `0,00` from garbage afterwards.
pub fn parse_amount(text: &str) -> BigDecimal {
    let normalized = text.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return BigDecimal::from(0);
    }
    BigDecimal::from_str(&normalized).unwrap_or_else(|_| BigDecimal::from(0))
}

/// Format an amount for a ledger cell.
///
/// The sign is dropped (the column carries it) and zero renders as an empty
/// string so that blank cells stay blank.
pub fn format_amount(value: &BigDecimal) -> String {
    if *value == BigDecimal::from(0) {
        return String::new();
    }

    let cents = value.abs().with_scale_round(2, RoundingMode::HalfEven);
    let (digits, _) = cents.as_bigint_and_exponent();
    let digits = format!("{:0>3}", digits.to_string());
    let (whole, fraction) = digits.split_at(digits.len() - 2);
    format!("{},{}", whole, fraction)
}

/// Parse `dd.mm.yyyy` or `dd.mm.yy`, in that order.
///
/// Returns `None` when neither matches; the caller drops the row.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let year_digits = text.rsplit('.').next()?.len();

    DATE_PATTERNS
        .iter()
        .filter(|(_, digits)| *digits == year_digits)
        .find_map(|(pattern, _)| NaiveDate::parse_from_str(text, pattern).ok())
}

/// Format a date as `dd.mm.yyyy`
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_german_format() {
        assert_eq!(parse_amount("1.234,56"), dec("1234.56"));
        assert_eq!(parse_amount("-1.234,56"), dec("-1234.56"));
        assert_eq!(parse_amount("12,5"), dec("12.5"));
        assert_eq!(parse_amount("1.000.000,00"), dec("1000000"));
        assert_eq!(parse_amount(" 42,00 "), dec("42"));
    }

    #[test]
    fn test_parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(""), BigDecimal::from(0));
        assert_eq!(parse_amount("   "), BigDecimal::from(0));
        assert_eq!(parse_amount("n/a"), BigDecimal::from(0));
        assert_eq!(parse_amount("12,34 EUR"), BigDecimal::from(0));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(&dec("1234.56")), "1234,56");
        assert_eq!(format_amount(&dec("-1234.56")), "1234,56");
        assert_eq!(format_amount(&dec("0.5")), "0,50");
        assert_eq!(format_amount(&dec("7")), "7,00");
        assert_eq!(format_amount(&dec("0.05")), "0,05");
        assert_eq!(format_amount(&BigDecimal::from(0)), "");
        assert_eq!(format_amount(&dec("0.00")), "");
    }

    #[test]
    fn test_format_amount_rounds_half_even() {
        assert_eq!(format_amount(&dec("2.345")), "2,34");
        assert_eq!(format_amount(&dec("2.355")), "2,36");
    }

    #[test]
    fn test_amount_round_trip() {
        for value in ["0.01", "-0.01", "1", "-19.99", "1234.56", "-98765.4", "1000000.10"] {
            let v = dec(value);
            let formatted = format_amount(&v);
            assert_eq!(parse_amount(&formatted), v.abs(), "round trip of {}", value);
        }
    }

    #[test]
    fn test_parse_date_patterns() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("15.03.2024"), Some(expected));
        assert_eq!(parse_date("15.03.24"), Some(expected));
        assert_eq!(parse_date(" 15.03.2024 "), Some(expected));
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-03-15"), None);
        assert_eq!(parse_date("31.02.2024"), None);
        assert_eq!(parse_date("15.03.202"), None);
        assert_eq!(parse_date("Buchungstag"), None);
    }

    #[test]
    fn test_format_date_always_four_digit_year() {
        let date = parse_date("01.12.23").unwrap();
        assert_eq!(format_date(&date), "01.12.2023");
    }

    #[test]
    fn test_date_round_trip() {
        let mut date = NaiveDate::from_ymd_opt(1999, 12, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2001, 3, 1).unwrap();
        while date < end {
            assert_eq!(parse_date(&format_date(&date)), Some(date));
            date = date.succ_opt().unwrap();
        }
    }
}
