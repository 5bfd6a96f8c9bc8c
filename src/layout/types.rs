use chrono::{DateTime, Datelike, FixedOffset};
use serde::Serialize;

use crate::config::LabelFormat;
use crate::geometry::Transform;

/// A segment placed on the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Position of this segment in the caller's input list.
    pub index: usize,
    pub timestamp: DateTime<FixedOffset>,
    pub num_records: u64,
    /// Share of all records, in `[0, 1]`.
    pub fraction: f64,
    pub start_at: f64,
    pub end_at: f64,
    /// Set on the earliest segment of each calendar year.
    pub is_year: bool,
    pub transform: Transform,
}

impl Segment {
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    pub fn len(&self) -> f64 {
        self.end_at - self.start_at
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    pub fn label(&self, format: LabelFormat) -> String {
        self.timestamp.format(format.pattern()).to_string()
    }
}

/// Segments of one calendar year. `first` is the year-boundary segment and
/// `segments` holds the rest of the year in layout order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGroup {
    pub year: i32,
    pub first: Segment,
    pub segments: Vec<Segment>,
}

impl YearGroup {
    /// A subset of the layout's records, so it cannot overflow.
    pub fn num_records(&self) -> u64 {
        self.first.num_records + self.segments.iter().map(|s| s.num_records).sum::<u64>()
    }
}
