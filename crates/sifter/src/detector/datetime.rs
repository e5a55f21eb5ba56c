//! Strict date/time parsing for text columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::dataset::Value;

/// Formats accepted by the strict parser, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateFormat {
    Rfc3339,
    DateTime(&'static str),
    Date(&'static str),
}

const FORMATS: &[DateFormat] = &[
    DateFormat::Rfc3339,
    DateFormat::DateTime("%Y-%m-%dT%H:%M:%S%.f"),
    DateFormat::DateTime("%Y-%m-%d %H:%M:%S%.f"),
    DateFormat::DateTime("%Y-%m-%d %H:%M"),
    DateFormat::Date("%Y-%m-%d"),
    DateFormat::Date("%Y/%m/%d"),
    DateFormat::Date("%Y%m%d"),
    DateFormat::DateTime("%m/%d/%Y %H:%M:%S"),
    DateFormat::DateTime("%m/%d/%Y %H:%M"),
    DateFormat::Date("%m/%d/%Y"),
    DateFormat::Date("%d.%m.%Y"),
    DateFormat::Date("%b %d, %Y"),
    DateFormat::Date("%B %d, %Y"),
    DateFormat::Date("%d %b %Y"),
    DateFormat::Date("%d %B %Y"),
];

impl DateFormat {
    /// Find the first format that parses `value`.
    pub(crate) fn detect(value: &str) -> Option<Self> {
        let value = value.trim();
        FORMATS.iter().copied().find(|f| f.parses(value))
    }

    /// Returns true if `value` parses exactly under this format.
    pub(crate) fn parses(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            DateFormat::Rfc3339 => DateTime::parse_from_rfc3339(value).is_ok(),
            DateFormat::DateTime(fmt) => NaiveDateTime::parse_from_str(value, fmt).is_ok(),
            DateFormat::Date(fmt) => NaiveDate::parse_from_str(value, fmt).is_ok(),
        }
    }
}

/// Returns true if every non-null value parses as a date under one shared format.
///
/// The first text value picks the format. Timestamps always pass; any other
/// non-text value fails.
pub(crate) fn parses_as_dates<'a>(values: impl IntoIterator<Item = &'a Value>) -> bool {
    let mut format: Option<DateFormat> = None;

    for value in values {
        match value {
            v if v.is_null() => continue,
            Value::Timestamp(_) => continue,
            Value::Text(text) => match format {
                Some(f) => {
                    if !f.parses(text) {
                        return false;
                    }
                }
                None => match DateFormat::detect(text) {
                    Some(f) => format = Some(f),
                    None => return false,
                },
            },
            _ => return false,
        }
    }

    true
}
