use std::fmt;

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Format of `<published>` values in a Blogger export, e.g. `2013-04-01T10:15:00.000-07:00`.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Format handed to templates, e.g. `2013-04-01T10:15:00Z`.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// What templates receive for a post without `<published>`: the zero time.
pub const MISSING_DATE: &str = "0001-01-01T00:00:00Z";

/// Byte length of a value in [`INPUT_FORMAT`].
const INPUT_LEN: usize = 29;

/// Error returned when a publish date does not match [`INPUT_FORMAT`].
#[derive(Debug, thiserror::Error)]
#[error("invalid publish date '{value}': expected YYYY-MM-DDTHH:MM:SS.sss±HH:MM")]
pub struct InvalidDate {
    pub value: String,
    #[source]
    pub source: Option<chrono::ParseError>,
}

/// Publication timestamp of an entry.
///
/// Parsing and rendering use two different fixed formats. Rendering keeps the
/// wall-clock fields of the original offset and appends a literal `Z`: the
/// output is NOT converted to UTC. `2013-04-01T10:15:00.000-07:00` renders as
/// `2013-04-01T10:15:00Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishDate(DateTime<FixedOffset>);

impl PublishDate {
    /// Parses `value`, which must match [`INPUT_FORMAT`] byte for byte:
    /// exactly three fraction digits, a `±HH:MM` offset, no surrounding
    /// whitespace, and no leap second.
    pub fn parse(value: &str) -> Result<Self, InvalidDate> {
        let invalid = |source| InvalidDate {
            value: value.to_string(),
            source,
        };

        // chrono accepts a missing fraction and a colon-less offset here.
        if !has_input_shape(value) {
            return Err(invalid(None));
        }
        let date = DateTime::parse_from_str(value, INPUT_FORMAT).map_err(|e| invalid(Some(e)))?;
        // Second 60 parses as a leap second.
        if date.nanosecond() >= 1_000_000_000 {
            return Err(invalid(None));
        }
        Ok(Self(date))
    }

    pub fn render(&self) -> String {
        self.0.format(OUTPUT_FORMAT).to_string()
    }

    /// Renders `date`, or [`MISSING_DATE`] when the entry had none.
    pub fn render_or_zero(date: Option<&Self>) -> String {
        date.map_or_else(|| MISSING_DATE.to_string(), Self::render)
    }
}

/// `YYYY-MM-DDTHH:MM:SS.sss±HH:MM`, checked by position.
fn has_input_shape(value: &str) -> bool {
    let b = value.as_bytes();
    b.len() == INPUT_LEN
        && b[4] == b'-'
        && b[7] == b'-'
        && b[10] == b'T'
        && b[13] == b':'
        && b[16] == b':'
        && b[19] == b'.'
        && b[20..23].iter().all(u8::is_ascii_digit)
        && matches!(b[23], b'+' | b'-')
        && b[26] == b':'
}

impl fmt::Display for PublishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<'de> Deserialize<'de> for PublishDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for PublishDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}
