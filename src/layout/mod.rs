mod canonical;
pub(crate) mod types;
pub use types::*;

use canonical::{CanonicalSegment, canonicalize};
use tracing::{debug, trace, warn};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::geometry::translate;
use crate::group::group_by;
use crate::ir::Timeline;

/// Segments of a timeline placed along one axis, plus the same segments
/// clustered by year.
///
/// Built once by [`compute_layout`]. A changed timeline or config needs a
/// fresh layout; nothing here is mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    config: LayoutConfig,
    segments: Vec<Segment>,
    segment_groups: Vec<YearGroup>,
    num_year_groups: usize,
}

pub fn compute_layout(
    timeline: &Timeline,
    config: &LayoutConfig,
) -> Result<TimelineLayout, LayoutError> {
    config.validate()?;
    let canonical = canonicalize(timeline.resolve()?);
    let total_records = total_records(&canonical)?;
    let num_year_groups = canonical.iter().filter(|c| c.is_year).count();
    let segments = place_segments(&canonical, total_records, num_year_groups, config);
    let segment_groups = group_years(&segments);

    debug!(
        segments = segments.len(),
        years = num_year_groups,
        length = config.line_segment,
        orientation = %config.orientation,
        "computed timeline layout"
    );

    Ok(TimelineLayout {
        config: config.clone(),
        segments,
        segment_groups,
        num_year_groups,
    })
}

/// Never negative: reserved delimiter space beyond the axis collapses it to zero.
fn usable_span(config: &LayoutConfig, num_year_groups: usize) -> f64 {
    (config.max_space_available() - config.delimiter_radius() * num_year_groups as f64).max(0.0)
}

fn total_records(canonical: &[CanonicalSegment]) -> Result<u64, LayoutError> {
    canonical
        .iter()
        .try_fold(0u64, |total, c| total.checked_add(c.segment.num_records))
        .ok_or(LayoutError::RecordOverflow)
}

/// Places segment edges at their cumulative share of the records, so edges
/// never move backwards and the last one lands on `span - radius`.
fn place_segments(
    canonical: &[CanonicalSegment],
    total_records: u64,
    num_year_groups: usize,
    config: &LayoutConfig,
) -> Vec<Segment> {
    let radius = config.delimiter_radius();
    let span = usable_span(config, num_year_groups);
    if span == 0.0 && num_year_groups > 0 {
        warn!(
            years = num_year_groups,
            "year delimiters do not fit on the axis, collapsing segments"
        );
    }
    if total_records == 0 && !canonical.is_empty() {
        warn!(
            segments = canonical.len(),
            "timeline has no records, every segment collapses to the origin"
        );
    }

    let last = canonical.len().saturating_sub(1);
    let mut cursor = -radius;
    // Bounded by total_records, which fits in a u64.
    let mut cumulative = 0u64;
    let mut segments = Vec::with_capacity(canonical.len());
    for (i, entry) in canonical.iter().enumerate() {
        let (fraction, end_at) = if total_records == 0 {
            (0.0, cursor)
        } else {
            cumulative += entry.segment.num_records;
            let share = cumulative as f64 / total_records as f64;
            let fraction = entry.segment.num_records as f64 / total_records as f64;
            (fraction, -radius + span * share)
        };
        let anchor = if entry.is_year && i != last {
            end_at - (config.label_spacing - radius)
        } else {
            end_at - radius
        };
        trace!(index = entry.segment.index, fraction, start = cursor, end = end_at, "segment");
        segments.push(Segment {
            index: entry.segment.index,
            timestamp: entry.segment.at,
            num_records: entry.segment.num_records,
            fraction,
            start_at: cursor,
            end_at,
            is_year: entry.is_year,
            transform: translate(config.orientation, anchor),
        });
        cursor = end_at;
    }
    segments
}

/// Clusters segments by year, newest year first.
fn group_years(segments: &[Segment]) -> Vec<YearGroup> {
    let mut groups: Vec<YearGroup> = group_by(segments.iter().cloned(), Segment::year)
        .into_iter()
        .filter_map(|(year, mut segments)| {
            let boundary = segments.iter().rposition(|s| s.is_year)?;
            let first = segments.remove(boundary);
            Some(YearGroup {
                year,
                first,
                segments,
            })
        })
        .collect();
    // Mixed offsets can surface an older year first.
    groups.sort_by(|a, b| b.year.cmp(&a.year));
    groups
}

impl TimelineLayout {
    pub fn new(timeline: &Timeline, config: &LayoutConfig) -> Result<Self, LayoutError> {
        compute_layout(timeline, config)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Flat newest-first segment list.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_groups(&self) -> &[YearGroup] {
        &self.segment_groups
    }

    pub fn num_year_groups(&self) -> usize {
        self.num_year_groups
    }

    /// Total records across all segments. Construction rejects totals that
    /// overflow, so this sum cannot.
    pub fn num_records(&self) -> u64 {
        self.segments.iter().map(|s| s.num_records).sum()
    }

    pub fn max_space_available(&self) -> f64 {
        self.config.max_space_available()
    }

    pub fn delimiter_radius(&self) -> f64 {
        self.config.delimiter_radius()
    }

    /// Span shared out between segments once year labels are reserved.
    pub fn usable_span(&self) -> f64 {
        usable_span(&self.config, self.num_year_groups)
    }

    pub fn select_segment_in_range(&self, position: f64) -> Option<&Segment> {
        self.select_index_in_range(position)
            .map(|index| &self.segments[index])
    }

    /// Index of the segment covering `position`.
    ///
    /// Each segment owns `[start_at, next.start_at)`; the last one runs up to
    /// the end of the available space. Positions before the first segment
    /// resolve to it and positions past the end resolve to the last one.
    pub fn select_index_in_range(&self, position: f64) -> Option<usize> {
        if self.segments.is_empty() || position.is_nan() {
            return None;
        }
        let last = self.segments.len() - 1;
        if position < self.segments[0].start_at {
            return Some(0);
        }
        let max_space = self.max_space_available();
        for (i, segment) in self.segments.iter().enumerate() {
            let upper = if i == last {
                max_space
            } else {
                self.segments[i + 1].start_at
            };
            if position >= segment.start_at && position < upper {
                return Some(i);
            }
        }
        Some(last)
    }
}
