//! Typed field values and raw-string parsing
//!
//! Every supported storage type implements [`FieldType`]. Parsing never
//! fails loudly: a raw string either yields a value or `None`.

use super::decl::FieldKind;
use super::resolver::FieldResolver;
use super::set::Field;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

/// Timestamp storage type
pub type Timestamp = DateTime<FixedOffset>;

/// A scalar type a configuration field can be stored as
pub trait FieldType: Clone + PartialEq + fmt::Debug + 'static {
    /// Semantic kind of this storage type
    const KIND: FieldKind;

    /// Parses a raw source string, `None` when it is not a valid value
    fn parse_raw(raw: &str) -> Option<Self>;

    /// Value used when the declared default does not parse
    fn zero() -> Self;

    /// Wraps a resolver into the tagged field variant
    fn into_field(resolver: FieldResolver<'_, Self>) -> Field<'_>;
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::String;

    fn parse_raw(raw: &str) -> Option<Self> {
        (!raw.is_empty()).then(|| raw.to_string())
    }

    fn zero() -> Self {
        String::new()
    }

    fn into_field(resolver: FieldResolver<'_, Self>) -> Field<'_> {
        Field::String(resolver)
    }
}

impl FieldType for i64 {
    const KIND: FieldKind = FieldKind::Int;

    fn parse_raw(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn zero() -> Self {
        0
    }

    fn into_field(resolver: FieldResolver<'_, Self>) -> Field<'_> {
        Field::Int(resolver)
    }
}

impl FieldType for f64 {
    const KIND: FieldKind = FieldKind::Float64;

    fn parse_raw(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn zero() -> Self {
        0.0
    }

    fn into_field(resolver: FieldResolver<'_, Self>) -> Field<'_> {
        Field::Float(resolver)
    }
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn parse_raw(raw: &str) -> Option<Self> {
        parse_bool(raw)
    }

    fn zero() -> Self {
        false
    }

    fn into_field(resolver: FieldResolver<'_, Self>) -> Field<'_> {
        Field::Bool(resolver)
    }
}

impl FieldType for Timestamp {
    const KIND: FieldKind = FieldKind::Timestamp;

    fn parse_raw(raw: &str) -> Option<Self> {
        parse_timestamp(raw)
    }

    fn zero() -> Self {
        zero_timestamp()
    }

    fn into_field(resolver: FieldResolver<'_, Self>) -> Field<'_> {
        Field::Timestamp(resolver)
    }
}

/// Parses the accepted boolean spellings
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// `0001-01-01T00:00:00Z`
pub fn zero_timestamp() -> Timestamp {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .unwrap_or_default()
}

/// Accepted timestamp layouts, tried in order
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// `YYYY-MM-DD`
    Date,
    /// Layout without zone information, read as UTC
    Naive(&'static str),
    /// `YYYY-MM-DDThh:mm:ss <ABBR>`
    Abbreviated,
    /// `YYYY-MM-DDThh:mm:ss±hhmm`
    Offset,
}

const LAYOUTS: [Layout; 6] = [
    Layout::Date,
    Layout::Naive("%Y-%m-%d %H:%M:%S%.f"),
    Layout::Naive("%Y-%m-%dT%H:%M:%S%.f"),
    Layout::Naive("%Y-%m-%dT%H:%M:%S%.fZ"),
    Layout::Abbreviated,
    Layout::Offset,
];

const BASE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f";

impl Layout {
    fn parse(self, raw: &str) -> Option<Timestamp> {
        match self {
            Layout::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().fixed_offset()),
            Layout::Naive(format) => NaiveDateTime::parse_from_str(raw, format)
                .ok()
                .map(|naive| naive.and_utc().fixed_offset()),
            Layout::Abbreviated => {
                let (stamp, abbreviation) = raw.rsplit_once(' ')?;
                let offset = abbreviation_offset(abbreviation)?;
                let naive = NaiveDateTime::parse_from_str(stamp, BASE_LAYOUT).ok()?;
                offset.from_local_datetime(&naive).single()
            }
            Layout::Offset => {
                DateTime::parse_from_str(raw, &format!("{BASE_LAYOUT}%z")).ok()
            }
        }
    }
}

/// Parses a timestamp using the first layout that matches
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    if !has_padded_fields(raw) {
        return None;
    }
    LAYOUTS.iter().find_map(|layout| layout.parse(raw))
}

/// Date and clock fields must be zero-padded (`2024-03-09`, not `2024-3-9`)
fn has_padded_fields(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let digits = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .is_some_and(|field| field.iter().all(u8::is_ascii_digit))
    };
    let byte_is = |index: usize, expected: u8| bytes.get(index) == Some(&expected);

    let date = digits(0..4) && byte_is(4, b'-') && digits(5..7) && byte_is(7, b'-') && digits(8..10);
    if !date {
        return false;
    }
    if bytes.len() == 10 {
        return true;
    }
    (byte_is(10, b'T') || byte_is(10, b' '))
        && digits(11..13)
        && byte_is(13, b':')
        && digits(14..16)
        && byte_is(16, b':')
        && digits(17..19)
}

/// Offset for a zone abbreviation.
///
/// Unknown abbreviations of three to five uppercase letters are accepted at
/// a zero offset.
fn abbreviation_offset(abbreviation: &str) -> Option<FixedOffset> {
    let hours = match abbreviation {
        "UTC" | "GMT" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        other
            if (3..=5).contains(&other.len())
                && other.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            0
        }
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}
