//! Maps raw pointer positions on the widget to timeline segments.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::config::LabelFormat;
use crate::error::OrientationError;
use crate::geometry::{Position, Transform, clamp, main_axis_position, translate};
use crate::layout::TimelineLayout;

/// What the pointer is over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerHit {
    /// Position along the track, measured from the start offset.
    pub position: f64,
    /// Index into [`TimelineLayout::segments`].
    pub segment_index: usize,
    pub timestamp: DateTime<FixedOffset>,
    pub num_records: u64,
    pub label: String,
    /// Places the hover indicator at `position`.
    pub transform: Transform,
}

/// Resolves a widget-space position to the segment beneath it.
///
/// The position is clamped to the track first, so pointers outside the
/// widget still resolve to the nearest end. Returns `Ok(None)` only when
/// the layout has no segments.
pub fn locate(
    layout: &TimelineLayout,
    position: &Position,
    format: LabelFormat,
) -> Result<Option<PointerHit>, OrientationError> {
    let config = layout.config();
    let raw = main_axis_position(config.orientation, position)?;
    let clamped = clamp(
        raw,
        config.line_segment,
        config.start_offset,
        config.end_offset,
    );
    let local = clamped - config.start_offset;
    let Some(segment_index) = layout.select_index_in_range(local) else {
        return Ok(None);
    };
    let segment = &layout.segments()[segment_index];
    Ok(Some(PointerHit {
        position: local,
        segment_index,
        timestamp: segment.timestamp,
        num_records: segment.num_records,
        label: segment.label(format),
        transform: translate(config.orientation, local),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::geometry::{Orientation, Point};
    use crate::ir::Timeline;
    use crate::layout::compute_layout;

    fn layout(orientation: Orientation) -> TimelineLayout {
        let mut timeline = Timeline::new();
        timeline.push("2022-10-30", 5);
        timeline.push("2023-02-15", 3);
        timeline.push("2024-01-01", 8);
        let config = LayoutConfig {
            orientation,
            ..Default::default()
        };
        compute_layout(&timeline, &config).unwrap()
    }

    #[test]
    fn locates_by_projected_axis() {
        let layout = layout(Orientation::Horizontal);
        let hit = locate(
            &layout,
            &Position::Point(Point { x: 324.0, y: 9000.0 }),
            LabelFormat::MonthYear,
        )
        .unwrap()
        .unwrap();
        assert_eq!(hit.position, 300.0);
        assert_eq!(hit.segment_index, 0);
        assert_eq!(hit.label, "January 2024");
        assert_eq!(hit.transform.to_string(), "translate3d(300px, 0px, 0px)");
    }

    #[test]
    fn clamps_positions_outside_the_track() {
        let layout = layout(Orientation::Vertical);
        let before = locate(&layout, &Position::Scalar(-50.0), LabelFormat::Year)
            .unwrap()
            .unwrap();
        assert_eq!(before.position, 0.0);
        assert_eq!(before.segment_index, 0);
        let after = locate(&layout, &Position::Scalar(5000.0), LabelFormat::Date)
            .unwrap()
            .unwrap();
        assert_eq!(after.position, 952.0);
        assert_eq!(after.segment_index, 2);
        assert_eq!(after.label, "2022-10-30");
    }

    #[test]
    fn invalid_positions_are_errors() {
        let layout = layout(Orientation::Vertical);
        let err = locate(&layout, &Position::Scalar(f64::INFINITY), LabelFormat::Year);
        assert!(matches!(err, Err(OrientationError::InvalidPosition(_))));
    }

    #[test]
    fn empty_layout_has_no_hit() {
        let layout = compute_layout(&Timeline::new(), &LayoutConfig::default()).unwrap();
        assert_eq!(
            locate(&layout, &Position::Scalar(10.0), LabelFormat::Year),
            Ok(None)
        );
    }
}
