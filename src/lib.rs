#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod group;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod pointer;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LabelFormat, LayoutConfig, PointerConfig, load_config};
pub use error::{LayoutError, OrientationError};
pub use geometry::{Orientation, Point, Position, Transform, clamp, main_axis_position, translate};
pub use group::group_by;
pub use ir::{SegmentInput, Timeline, Timestamp};
pub use layout::{Segment, TimelineLayout, YearGroup, compute_layout};
pub use parser::parse_segments;
pub use pointer::{PointerHit, locate};
