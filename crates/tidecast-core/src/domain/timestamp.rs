use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

/// Error for input text that matches none of the accepted date formats.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{value}' is not parseable as a date/time")]
pub struct TimestampParseError {
    pub value: String,
}

/// Date-time formats accepted without an explicit offset; all are
/// interpreted as UTC.
const DATETIME_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
];

/// Date-only formats; parsed values land at midnight UTC.
const DATE_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]/[month]/[day]"),
    format_description!("[month]/[day]/[year]"),
];

/// Canonical UTC timestamp for the observation axis.
///
/// Unlike a strict RFC3339 wrapper this parses permissively: uploaded
/// tables carry dates in whatever shape the source system emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Best-effort parse: RFC3339 first, then offset-less date-times,
    /// then date-only forms.
    pub fn parse(input: &str) -> Result<Self, TimestampParseError> {
        let trimmed = input.trim();

        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self(parsed.to_offset(time::UtcOffset::UTC)));
        }

        for format in DATETIME_FORMATS {
            if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, format) {
                return Ok(Self(parsed.assume_utc()));
            }
        }

        for format in DATE_FORMATS {
            if let Ok(parsed) = Date::parse(trimmed, format) {
                return Ok(Self(parsed.midnight().assume_utc()));
            }
        }

        Err(TimestampParseError {
            value: input.to_owned(),
        })
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(time::UtcOffset::UTC))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn date(self) -> Date {
        self.0.date()
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .expect("UTC timestamp must be RFC3339 formattable")
    }

    /// Signed gap to an earlier timestamp.
    pub fn since(self, earlier: Timestamp) -> Duration {
        self.0 - earlier.0
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
