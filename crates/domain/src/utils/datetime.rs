//! Timestamp decoding for C4C records.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a C4C timestamp into UTC.
///
/// C4C OData v2 emits `Edm.DateTime` as `/Date(1700000000000)/` (optionally
/// with an offset suffix such as `/Date(1700000000000+0000)/`), while
/// `Edm.DateTimeOffset` fields and hand-written fixtures use ISO-8601.
/// Returns `None` for anything else.
pub fn parse_odata_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Some(inner) = raw.strip_prefix("/Date(").and_then(|rest| rest.strip_suffix(")/")) {
        // The offset only annotates the original zone; the millis are UTC.
        let millis_end = inner
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '+' || *c == '-')
            .map_or(inner.len(), |(idx, _)| idx);
        let millis = inner[..millis_end].parse::<i64>().ok()?;
        return DateTime::from_timestamp_millis(millis);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|naive| naive.and_utc())
}
