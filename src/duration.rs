//! Duration parsing utilities.
//!
//! Two unrelated duration shapes show up in this crate: human-readable
//! config timeouts like "15s", and the `H:M:S` elapsed-time cells the call
//! report renders for ringing/talking time.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{de, Deserialize, Deserializer};

/// Parse a duration string like "14d", "24h", "30m", "60s".
///
/// Supported units:
/// - `d` - days (24 hours)
/// - `h` - hours
/// - `m` - minutes
/// - `s` - seconds
///
/// The input is case-insensitive and whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use callsync::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("24h").unwrap(), Duration::from_secs(24 * 60 * 60));
/// assert_eq!(parse_duration("30m").unwrap(), Duration::from_secs(30 * 60));
/// assert_eq!(parse_duration("60s").unwrap(), Duration::from_secs(60));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();
    let (num, unit) = if s.ends_with('d') {
        (s.trim_end_matches('d'), "d")
    } else if s.ends_with('h') {
        (s.trim_end_matches('h'), "h")
    } else if s.ends_with('m') {
        (s.trim_end_matches('m'), "m")
    } else if s.ends_with('s') {
        (s.trim_end_matches('s'), "s")
    } else {
        anyhow::bail!("Duration must end with d, h, m, or s");
    };

    let num: u64 = num.parse().with_context(|| "Invalid number in duration")?;

    let secs = match unit {
        "d" => num
            .checked_mul(24 * 60 * 60)
            .context("Duration is too large")?,
        "h" => num.checked_mul(60 * 60).context("Duration is too large")?,
        "m" => num.checked_mul(60).context("Duration is too large")?,
        "s" => num,
        _ => unreachable!(),
    };

    Ok(Duration::from_secs(secs))
}

/// Serde deserializer for duration strings.
///
/// Use with `#[serde(deserialize_with = "deserialize_duration")]`.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(de::Error::custom)
}

/// Convert an `H:M:S` elapsed-time string into fractional hours, rounding
/// any started minute up to a full minute first (billing-style rounding).
///
/// Empty or malformed input degrades to `0.0` rather than erroring: one bad
/// duration cell must not sink an otherwise valid report row.
///
/// # Examples
///
/// ```
/// use callsync::duration::hms_to_ceil_hours;
///
/// assert_eq!(hms_to_ceil_hours("01:00:00"), 1.0);
/// assert_eq!(hms_to_ceil_hours("00:00:30"), 1.0 / 60.0);
/// assert_eq!(hms_to_ceil_hours(""), 0.0);
/// ```
pub fn hms_to_ceil_hours(s: &str) -> f64 {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if parts.len() != 3 {
        return 0.0;
    }

    let mut fields = [0u64; 3];
    for (i, part) in parts.iter().enumerate() {
        match part.trim().parse::<u64>() {
            Ok(n) => fields[i] = n,
            Err(_) => return 0.0,
        }
    }

    let [h, m, sec] = fields;
    let total_seconds = h * 3600 + m * 60 + sec;
    let total_minutes = total_seconds.div_ceil(60);
    total_minutes as f64 / 60.0
}
