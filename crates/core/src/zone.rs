//! The reference time zone all normalized timestamps are expressed in.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;
use std::str::FromStr;

/// Default reference zone ("Eastern Standard Time" on Windows hosts).
pub const DEFAULT_REFERENCE_ZONE: &str = "America/New_York";

/// Resolved reference time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceZone(Tz);

impl ReferenceZone {
    /// Resolve a zone by IANA name.
    ///
    /// The Windows identifier `Eastern Standard Time` and the `EST`
    /// abbreviation both map to `America/New_York`.
    pub fn resolve(name: &str) -> Result<Self> {
        let name = name.trim();
        let iana = match name {
            "Eastern Standard Time" | "EST" => DEFAULT_REFERENCE_ZONE,
            other => other,
        };
        Tz::from_str(iana)
            .map(Self)
            .map_err(|_| Error::config(format!("unknown reference time zone '{name}'")))
    }

    /// US Eastern time.
    pub fn eastern() -> Self {
        Self(chrono_tz::America::New_York)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Convert an instant carrying an explicit offset into reference-zone
    /// wall-clock time.
    pub fn wall_clock(&self, instant: DateTime<FixedOffset>) -> NaiveDateTime {
        instant.with_timezone(&self.0).naive_local()
    }
}

impl Default for ReferenceZone {
    fn default() -> Self {
        Self::eastern()
    }
}
