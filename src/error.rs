use thiserror::Error;

/// Failure to project a value onto the main axis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrientationError {
    #[error("invalid orientation '{0}', expected 'vertical' or 'horizontal'")]
    InvalidOrientation(String),
    #[error("invalid position {0}, expected a number or an {{x, y}} coordinate")]
    InvalidPosition(String),
}

/// Rejected layout input. Raised while building a [`crate::layout::TimelineLayout`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("line segment length must be positive, got {0}")]
    InvalidLength(f64),
    #[error("{field} must not be negative, got {value}")]
    NegativeSpacing { field: &'static str, value: f64 },
    #[error("start offset {start} plus end offset {end} must be less than the line length {length}")]
    OffsetsExceedLength { start: f64, end: f64, length: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("total record count does not fit in a u64")]
    RecordOverflow,
    #[error("segment {index} has an unparseable timestamp: {value}")]
    InvalidTimestamp { index: usize, value: String },
}
