//! Parsing of command-line datetimes.

use anyhow::{anyhow, Result};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse an IANA timezone name such as `Europe/Berlin`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| anyhow!("Invalid timezone: {}", name))
}

/// Parse a datetime into UTC.
///
/// Accepts RFC 3339 (with an offset, e.g. "2026-02-17T14:00:00+01:00") and
/// naive local time (e.g. "2026-02-17T14:00"), which is interpreted in `tz`.
/// Local times that fall in a DST gap or overlap are rejected.
pub fn parse_datetime(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| anyhow!("Invalid datetime '{}': expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]", s))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(..) => Err(anyhow!("Ambiguous local time '{}' in {}", s, tz.name())),
        LocalResult::None => Err(anyhow!("Local time '{}' does not exist in {}", s, tz.name())),
    }
}
