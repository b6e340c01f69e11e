//! Trade date/time parsing for the supported dialects.

use chrono::{DateTime, NaiveDateTime};
use tradeconv_core::{Error, ReferenceZone, Result};

/// How a dialect's date and time columns relate to the reference zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeConvention {
    /// Values are already reference-zone wall-clock time.
    WallClock,
    /// Values carry a UTC offset and must be converted.
    UtcOffset,
}

/// Parse a date and a clock time with no offset.
///
/// Seconds are optional: some exports write `HH:mm`.
pub fn parse_wall_clock(date: &str, time: &str, date_format: &str) -> Result<NaiveDateTime> {
    let combined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&combined, &format!("{date_format} %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(&combined, &format!("{date_format} %H:%M")))
        .map_err(|_| Error::invalid_field("date/time", combined))
}

/// Parse a date and time carrying an explicit offset (`-04:00`, `+0530`) and
/// convert the instant into reference-zone wall-clock time.
pub fn parse_with_offset(
    date: &str,
    time: &str,
    offset: &str,
    date_format: &str,
    zone: &ReferenceZone,
) -> Result<NaiveDateTime> {
    let time = time.trim();
    let time = if time.matches(':').count() == 1 {
        format!("{time}:00")
    } else {
        time.to_string()
    };
    let combined = format!("{} {} {}", date.trim(), time, offset.trim());
    DateTime::parse_from_str(&combined, &format!("{date_format} %H:%M:%S %:z"))
        .or_else(|_| DateTime::parse_from_str(&combined, &format!("{date_format} %H:%M:%S %z")))
        .map(|instant| zone.wall_clock(instant))
        .map_err(|_| Error::invalid_field("date/time", combined))
}

/// Split a broker time value such as `09:31:00,GMT-04:00` into the clock part
/// and the offset. A bare `GMT` means UTC.
pub fn split_gmt_suffix(value: &str) -> (&str, Option<&str>) {
    match value.split_once(',') {
        Some((clock, suffix)) => {
            let suffix = suffix.trim();
            let offset = suffix.strip_prefix("GMT").map(|o| {
                let o = o.trim();
                if o.is_empty() {
                    "+00:00"
                } else {
                    o
                }
            });
            (clock, offset)
        }
        None => (value, None),
    }
}
