//! Conversion of raw JSON values into timestamps.
//!
//! Accepts the same inputs as the base date type: epoch milliseconds (as a
//! number or a numeric string such as `"-5"`, `"+5"` or `"1.5"`), RFC 3339
//! strings, and `YYYY-MM-DD` dates (midnight UTC). Fractional milliseconds
//! are truncated toward zero.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

use crate::types::Timestamp;

/// Convert a JSON value into a timestamp, or `None` if it is not a date.
pub fn date_from_json(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => {
            let ms = match n.as_i64() {
                Some(ms) => ms,
                None => {
                    let f = n.as_f64()?;
                    if !f.is_finite() || f.abs() > i64::MAX as f64 {
                        return None;
                    }
                    f.trunc() as i64
                }
            };
            from_millis(ms)
        }
        Value::String(s) => date_from_str(s),
        _ => None,
    }
}

/// Parse a date string: epoch milliseconds, RFC 3339, or `YYYY-MM-DD`.
pub fn date_from_str(raw: &str) -> Option<Timestamp> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(integral) = numeric_literal(s) {
        return integral.parse::<i64>().ok().and_then(from_millis);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render a timestamp the way error messages interpolate it.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn from_millis(ms: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Match `[+-]?digits(.digits)?` and return the signed integral part.
fn numeric_literal(s: &str) -> Option<&str> {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
        return None;
    }

    let sign_len = s.len() - unsigned.len();
    Some(&s[..sign_len + int_part.len()])
}
