//! Display formatting for amounts and dates

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Format an amount as Colombian pesos: `$1.234.567`
///
/// Rounded to whole pesos. Non-finite amounts render as `$0`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if rounded < 0.0 {
        format!("$-{grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format a date as `dd-mm-yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Format a date with an abbreviated Spanish month: `15-Ene-2024`
pub fn format_date_with_month_name(date: NaiveDate) -> String {
    format!(
        "{}-{}-{}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_234_567.0), "$1.234.567");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1.000");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(1_500.6), "$1.501");
        assert_eq!(format_currency(-25_000.0), "$-25.000");
    }

    #[test]
    fn test_format_currency_non_finite() {
        assert_eq!(format_currency(f64::NAN), "$0");
        assert_eq!(format_currency(f64::INFINITY), "$0");
    }

    #[test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        assert_eq!(format_date(date), "05-01-2024");
        assert_eq!(format_date_with_month_name(date), "5-Ene-2024");

        let date = NaiveDate::from_ymd_opt(2023, 12, 15).unwrap();
        assert_eq!(format_date_with_month_name(date), "15-Dic-2023");
    }
}
