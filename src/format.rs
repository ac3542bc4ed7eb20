//! Pure display formatters.
//!
//! All money math stays in f64 won; scaling to 억/만 happens only at
//! the formatting boundary. Rates arrive as already-scaled percentages
//! (42.5 means 42.5%), never fractions.

use chrono::{DateTime, Utc};

/// Korean currency rendering: 억원 above 1e8, 만원 above 1e4,
/// grouped 원 below. Zero and non-finite inputs collapse to "0원".
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() || amount == 0.0 {
        return "0원".to_string();
    }
    let abs = amount.abs();
    if abs >= 1.0e8 {
        format!("{:.1}억원", amount / 1.0e8)
    } else if abs >= 1.0e4 {
        // round half away from zero, matching the sheet's rounding
        format!("{}만원", (amount / 1.0e4).round() as i64)
    } else {
        format!("{}원", group_thousands(amount.round() as i64))
    }
}

pub fn format_currency_opt(amount: Option<f64>) -> String {
    format_currency(amount.unwrap_or(0.0))
}

/// One-decimal percent. Zero/missing/NaN render as "0%", not "0.0%".
pub fn format_percent(rate: f64) -> String {
    if !rate.is_finite() || rate == 0.0 {
        return "0%".to_string();
    }
    format!("{:.1}%", rate)
}

pub fn format_percent_opt(rate: Option<f64>) -> String {
    format_percent(rate.unwrap_or(0.0))
}

/// Whole days until `end`, ceiling, floored at zero once past.
pub fn days_remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (end - now).num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs + 86_399) / 86_400
}

/// MM-DD tail of a YYYY-MM-DD date string. Shorter inputs pass through.
pub fn month_day(date: &str) -> &str {
    if date.len() >= 10 {
        &date[5..10]
    } else {
        date
    }
}

pub fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn currency_scales_by_magnitude() {
        assert_eq!(format_currency(0.0), "0원");
        assert_eq!(format_currency(500.0), "500원");
        assert_eq!(format_currency(1_234.0), "1,234원");
        assert_eq!(format_currency(15_000.0), "2만원");
        assert_eq!(format_currency(240_000.0), "24만원");
        assert_eq!(format_currency(100_000_000.0), "1.0억원");
        assert_eq!(format_currency(24_000_000_000.0), "240.0억원");
        assert_eq!(format_currency(12_350_000_000.0), "123.5억원");
    }

    #[test]
    fn currency_rejects_non_finite() {
        assert_eq!(format_currency(f64::NAN), "0원");
        assert_eq!(format_currency(f64::INFINITY), "0원");
    }

    #[test]
    fn currency_negative_amounts_keep_sign() {
        assert_eq!(format_currency(-500.0), "-500원");
        assert_eq!(format_currency(-15_000.0), "-2만원");
        assert_eq!(format_currency(-100_000_000.0), "-1.0억원");
    }

    #[test]
    fn percent_zero_is_bare() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(f64::NAN), "0%");
        assert_eq!(format_percent(42.5), "42.5%");
        assert_eq!(format_percent(100.0), "100.0%");
        assert_eq!(format_percent_opt(None), "0%");
    }

    #[test]
    fn days_remaining_ceils_and_clamps() {
        let end = Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap();
        let same = Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(days_remaining(end, same), 0);

        let one_sec_before = Utc.with_ymd_and_hms(2026, 12, 30, 23, 59, 59).unwrap();
        assert_eq!(days_remaining(end, one_sec_before), 1);

        let ten_days = Utc.with_ymd_and_hms(2026, 12, 21, 0, 0, 0).unwrap();
        assert_eq!(days_remaining(end, ten_days), 10);

        let after = Utc.with_ymd_and_hms(2027, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(days_remaining(end, after), 0);
    }

    #[test]
    fn month_day_truncates_iso_dates() {
        assert_eq!(month_day("2026-03-15"), "03-15");
        assert_eq!(month_day("03-15"), "03-15");
        assert_eq!(month_day(""), "");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }
}
