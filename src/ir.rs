use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// A segment timestamp as supplied by the caller.
///
/// Numbers are epoch milliseconds; fractional ones are truncated to whole
/// milliseconds. Strings are tried as RFC 3339 first and then as a handful
/// of plain date and date-time forms, which are read as UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    FractionalMillis(f64),
    Instant(DateTime<FixedOffset>),
    Text(String),
}

/// Largest distance from the epoch a JS `Date` can represent.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

impl Timestamp {
    /// Resolves to an instant in the caller's offset, or `None` when the
    /// value is not a date.
    pub fn resolve(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Timestamp::Millis(millis) => from_millis(*millis),
            Timestamp::FractionalMillis(millis) => from_fractional_millis(*millis),
            Timestamp::Instant(instant) => Some(*instant),
            Timestamp::Text(text) => parse_timestamp_text(text),
        }
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Timestamp::Instant(instant)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Timestamp::Instant(instant.fixed_offset())
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp::Text(text.to_string())
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp::Millis(millis)
    }
}

impl From<f64> for Timestamp {
    fn from(millis: f64) -> Self {
        Timestamp::FractionalMillis(millis)
    }
}

fn from_millis(millis: i64) -> Option<DateTime<FixedOffset>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|instant| instant.fixed_offset())
}

fn from_fractional_millis(millis: f64) -> Option<DateTime<FixedOffset>> {
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    from_millis(millis.trunc() as i64)
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant);
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().fixed_offset());
        }
    }
    if let Ok(millis) = text.parse::<i64>() {
        return from_millis(millis);
    }
    if let Ok(millis) = text.parse::<f64>() {
        return from_fractional_millis(millis);
    }
    None
}

/// One timestamped bucket of records, before layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentInput {
    pub timestamp: Timestamp,
    pub num_records: u64,
}

impl SegmentInput {
    pub fn new(timestamp: impl Into<Timestamp>, num_records: u64) -> Self {
        Self {
            timestamp: timestamp.into(),
            num_records,
        }
    }
}

/// The caller's segment list. Order is not significant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    pub segments: Vec<SegmentInput>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timestamp: impl Into<Timestamp>, num_records: u64) {
        self.segments.push(SegmentInput::new(timestamp, num_records));
    }

    /// Resolves every timestamp, failing on the first one that is not a date.
    pub fn resolve(&self) -> Result<Vec<ResolvedSegment>, LayoutError> {
        self.segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let at = segment
                    .timestamp
                    .resolve()
                    .ok_or_else(|| LayoutError::InvalidTimestamp {
                        index,
                        value: describe_timestamp(&segment.timestamp),
                    })?;
                Ok(ResolvedSegment {
                    index,
                    at,
                    num_records: segment.num_records,
                })
            })
            .collect()
    }
}

impl FromIterator<SegmentInput> for Timeline {
    fn from_iter<I: IntoIterator<Item = SegmentInput>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

fn describe_timestamp(timestamp: &Timestamp) -> String {
    match timestamp {
        Timestamp::Millis(millis) => millis.to_string(),
        Timestamp::FractionalMillis(millis) => millis.to_string(),
        Timestamp::Instant(instant) => instant.to_rfc3339(),
        Timestamp::Text(text) => format!("'{text}'"),
    }
}

/// A segment input whose timestamp has been resolved. `index` is its
/// position in the caller's list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSegment {
    pub index: usize,
    pub at: DateTime<FixedOffset>,
    pub num_records: u64,
}

impl ResolvedSegment {
    pub fn year(&self) -> i32 {
        self.at.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_numeric_millis() {
        let ts = Timestamp::Millis(1_704_067_200_000);
        assert_eq!(ts.resolve().map(|at| at.year()), Some(2024));
    }

    #[test]
    fn resolves_common_text_forms() {
        for text in [
            "2023-02-15",
            "2023/02/15",
            "2023-02-15T10:30",
            "2023-02-15 10:30:00",
            "2023-02-15T10:30:00+02:00",
        ] {
            let at = Timestamp::from(text).resolve();
            assert_eq!(at.map(|at| at.year()), Some(2023), "{text}");
        }
    }

    #[test]
    fn rejects_garbage_text() {
        assert_eq!(Timestamp::from("next tuesday").resolve(), None);
        assert_eq!(Timestamp::from("2023-13-40").resolve(), None);
        assert_eq!(Timestamp::from("").resolve(), None);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let json = r#"[
            {"timestamp": 0, "numRecords": 1},
            {"timestamp": "2024-01-01T00:00:00Z", "numRecords": 2},
            {"timestamp": "2022-10-30", "numRecords": 3}
        ]"#;
        let timeline: Timeline = serde_json::from_str(json).unwrap();
        assert_eq!(timeline.segments.len(), 3);
        assert_eq!(timeline.segments[0].timestamp, Timestamp::Millis(0));
        assert!(matches!(timeline.segments[1].timestamp, Timestamp::Instant(_)));
        assert_eq!(timeline.segments[2].timestamp, Timestamp::from("2022-10-30"));
    }

    #[test]
    fn year_follows_the_supplied_offset() {
        let at = Timestamp::from("2023-12-31T23:30:00-05:00").resolve().unwrap();
        assert_eq!(at.year(), 2023);
        let json = r#"{"timestamp": "2023-12-31T23:30:00-05:00", "numRecords": 1}"#;
        let segment: SegmentInput = serde_json::from_str(json).unwrap();
        assert_eq!(segment.timestamp.resolve().map(|at| at.year()), Some(2023));
    }

    #[test]
    fn accepts_fractional_and_exponent_millis() {
        let json = r#"[
            {"timestamp": 1.7041e12, "numRecords": 1},
            {"timestamp": 1704067200000.75, "numRecords": 1}
        ]"#;
        let timeline: Timeline = serde_json::from_str(json).unwrap();
        assert_eq!(
            timeline.segments[0].timestamp,
            Timestamp::FractionalMillis(1.7041e12)
        );
        let resolved = timeline.resolve().unwrap();
        assert_eq!(resolved[0].year(), 2024);
        assert_eq!(resolved[1].at.timestamp_millis(), 1_704_067_200_000);
        assert_eq!(Timestamp::from("1.7041e12").resolve().map(|at| at.year()), Some(2024));
    }

    #[test]
    fn rejects_out_of_range_fractional_millis() {
        assert_eq!(Timestamp::FractionalMillis(f64::NAN).resolve(), None);
        assert_eq!(Timestamp::FractionalMillis(9.0e15).resolve(), None);
        assert_eq!(Timestamp::from("inf").resolve(), None);
    }

    #[test]
    fn resolve_reports_offending_index() {
        let mut timeline = Timeline::new();
        timeline.push("2024-01-01", 3);
        timeline.push("not a date", 1);
        let err = timeline.resolve().unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidTimestamp {
                index: 1,
                value: "'not a date'".to_string()
            }
        );
    }
}
