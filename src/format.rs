//! Display formatting shared by the dashboard views.
//!
//! Money is Thai baht without decimals, numbers use comma grouping and dates
//! are written out in full.

use chrono::{DateTime, NaiveDate, Utc};

/// Groups the digits of a non-negative integer with commas.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats an amount as Thai baht, rounded to whole baht.
///
/// ```rust
/// use posboard::format::format_currency;
///
/// assert_eq!(format_currency(1234.5), "฿1,235");
/// assert_eq!(format_currency(-80.0), "-฿80");
/// ```
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}฿{}", sign, group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Formats a number with comma grouping and at most three decimals.
pub fn format_number(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac)
    }
}

/// "March 5, 2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "March 5, 2024 14:07".
pub fn format_date_time(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y %H:%M").to_string()
}

/// Relative age of `then` as seen from `now`: seconds under a minute,
/// minutes under an hour, hours under a day, days beyond that.
///
/// Timestamps in the future count as zero seconds ago.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let (n, unit) = match seconds {
        s if s < 60 => (s, "second"),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s => (s / 86_400, "day"),
    };
    let plural = if n == 1 { "" } else { "s" };
    format!("{} {}{} ago", n, unit, plural)
}

/// Keeps the first `max` characters of `text` and appends `...` if anything
/// was cut.
pub fn truncate_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Price after taking `percentage` percent off.
pub fn calculate_discount(price: f64, percentage: f64) -> f64 {
    price - price * percentage / 100.0
}
