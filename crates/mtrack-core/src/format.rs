//! # Display Formatters
//!
//! Pure functions turning amounts, counts and dates into the strings the
//! views show. Digit grouping follows the `en-US` locale via ICU4X; absent
//! or non-finite input never fails, it maps to a fixed placeholder.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use icu_decimal::input::Decimal;
use icu_decimal::options::DecimalFormatterOptions;
use icu_decimal::DecimalFormatter;
use icu_locale_core::locale;

/// Shown for a date string that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Fraction digits `format_number` keeps at most.
const NUMBER_MAX_FRACTION_DIGITS: usize = 3;

thread_local! {
    static EN_US: Option<DecimalFormatter> =
        DecimalFormatter::try_new(locale!("en-US").into(), DecimalFormatterOptions::default()).ok();
}

/// Insert `en-US` thousands separators into a plain decimal string.
///
/// Falls back to the input unchanged if ICU cannot parse or format it.
fn group_digits(plain: &str) -> String {
    let Ok(decimal) = plain.parse::<Decimal>() else {
        return plain.to_string();
    };
    EN_US.with(|formatter| match formatter {
        Some(f) => f.format(&decimal).to_string(),
        None => plain.to_string(),
    })
}

/// Drop the sign from a fixed-point rendering that rounds to zero, so
/// `-0.0` and `-0.001` print as `0.00`.
fn unsigned_zero(fixed: String) -> String {
    match fixed.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => fixed,
    }
}

/// `format_currency_with(amount, "$", 2)`.
pub fn format_currency(amount: Option<f64>) -> String {
    format_currency_with(amount, "$", 2)
}

/// Format `amount` as `<symbol><grouped digits>` with exactly `decimals`
/// fraction digits.
///
/// Absent or non-finite input yields `<symbol>0.00` whatever `decimals` is.
pub fn format_currency_with(amount: Option<f64>, symbol: &str, decimals: usize) -> String {
    match amount.filter(|v| v.is_finite()) {
        Some(v) => {
            let fixed = unsigned_zero(format!("{v:.decimals$}"));
            format!("{symbol}{}", group_digits(&fixed))
        }
        None => format!("{symbol}0.00"),
    }
}

/// Format a count or measure with thousands separators and up to three
/// fraction digits. Absent or non-finite input yields `"0"`.
pub fn format_number(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return "0".to_string();
    };
    let places = NUMBER_MAX_FRACTION_DIGITS;
    let fixed = unsigned_zero(format!("{v:.places$}"));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    group_digits(trimmed)
}

/// Parse the date part of an ISO-8601 string.
///
/// Zoned timestamps are converted to UTC before taking the date. Naive
/// timestamps and plain dates are taken as written.
fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn short_date(date: NaiveDate) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format("%b %-d, %Y")).ok()?;
    Some(out)
}

/// Render an ISO date or timestamp as `Mon D, YYYY`.
///
/// Empty input yields `""`; anything unparseable yields `"Invalid Date"`.
pub fn format_date(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    parse_calendar_date(input)
        .and_then(short_date)
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Render an already-parsed calendar date as `Mon D, YYYY`.
pub fn format_day(date: NaiveDate) -> String {
    short_date(date).unwrap_or_else(|| INVALID_DATE.to_string())
}

/// `"Mar 5, 2024 - Apr 1, 2024"`, or the raw inputs joined the same way
/// when either side does not parse.
pub fn format_date_range(start: &str, end: &str) -> String {
    let formatted = parse_calendar_date(start)
        .and_then(short_date)
        .zip(parse_calendar_date(end).and_then(short_date));
    match formatted {
        Some((s, e)) => format!("{s} - {e}"),
        None => format!("{start} - {end}"),
    }
}

/// A percentage value with fixed places: `12.5` → `"12.50%"`.
pub fn format_percentage(value: f64, places: usize) -> String {
    format!("{value:.places$}%")
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn with_remainder(head: String, rest: u32) -> String {
    if rest == 0 {
        head
    } else {
        format!("{head} {}", plural(rest, "day"))
    }
}

/// Human-readable span: days under a week, then weeks, 30-day months and
/// 365-day years, each with leftover days.
pub fn format_duration_days(days: u32) -> String {
    match days {
        0 => "Same day".to_string(),
        1..=6 => plural(days, "day"),
        7..=29 => with_remainder(plural(days / 7, "week"), days % 7),
        30..=364 => with_remainder(plural(days / 30, "month"), days % 30),
        _ => with_remainder(plural(days / 365, "year"), days % 365),
    }
}
