use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::OrientationError;

/// Axis along which the timeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl FromStr for Orientation {
    type Err = OrientationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            _ => Err(OrientationError::InvalidOrientation(value.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A pointer position as reported by an input source: either already
/// projected onto the axis, or a 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Scalar(f64),
    Point(Point),
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Position::Scalar(value)
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Position::Point(point)
    }
}

/// Accepts `"300"` or `"10,300"` (x, y).
impl FromStr for Position {
    type Err = OrientationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || OrientationError::InvalidPosition(value.to_string());
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [scalar] => scalar
                .parse::<f64>()
                .map(Position::Scalar)
                .map_err(|_| invalid()),
            [x, y] => {
                let x = x.parse::<f64>().map_err(|_| invalid())?;
                let y = y.parse::<f64>().map_err(|_| invalid())?;
                Ok(Position::Point(Point { x, y }))
            }
            _ => Err(invalid()),
        }
    }
}

/// Bounds `position` to `[offset_start, total_distance - offset_end]`.
pub fn clamp(position: f64, total_distance: f64, offset_start: f64, offset_end: f64) -> f64 {
    let upper = total_distance - offset_end;
    if position < offset_start {
        offset_start
    } else if position > upper {
        upper
    } else {
        position
    }
}

/// Scalar projection of `position` onto the main axis: `y` for vertical, `x` for horizontal.
pub fn main_axis_position(
    orientation: Orientation,
    position: &Position,
) -> Result<f64, OrientationError> {
    let value = match (position, orientation) {
        (Position::Scalar(value), _) => *value,
        (Position::Point(point), Orientation::Vertical) => point.y,
        (Position::Point(point), Orientation::Horizontal) => point.x,
    };
    if !value.is_finite() {
        return Err(OrientationError::InvalidPosition(format!("{position:?}")));
    }
    Ok(value)
}

/// Places content at `value` along the main axis and at zero on the others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub orientation: Orientation,
    pub value: f64,
}

pub fn translate(orientation: Orientation, value: f64) -> Transform {
    Transform { orientation, value }
}

impl Transform {
    /// Component offsets `(x, y, z)` in pixels.
    pub fn offsets(&self) -> (f64, f64, f64) {
        match self.orientation {
            Orientation::Vertical => (0.0, self.value, 0.0),
            Orientation::Horizontal => (self.value, 0.0, 0.0),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y, z) = self.offsets();
        write!(
            f,
            "translate3d({}px, {}px, {}px)",
            format_px(x),
            format_px(y),
            format_px(z)
        )
    }
}

impl Serialize for Transform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Renders a pixel value with at most three decimals, dropping trailing zeros.
pub(crate) fn format_px(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.3}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_both_ends() {
        assert_eq!(clamp(-5.0, 100.0, 10.0, 10.0), 10.0);
        assert_eq!(clamp(50.0, 100.0, 10.0, 10.0), 50.0);
        assert_eq!(clamp(95.0, 100.0, 10.0, 10.0), 90.0);
    }

    #[test]
    fn projects_points_per_orientation() {
        let point = Position::Point(Point { x: 3.0, y: 7.0 });
        assert_eq!(main_axis_position(Orientation::Vertical, &point), Ok(7.0));
        assert_eq!(main_axis_position(Orientation::Horizontal, &point), Ok(3.0));
        assert_eq!(
            main_axis_position(Orientation::Horizontal, &Position::Scalar(12.5)),
            Ok(12.5)
        );
    }

    #[test]
    fn rejects_non_finite_positions() {
        let err = main_axis_position(Orientation::Vertical, &Position::Scalar(f64::NAN));
        assert!(matches!(err, Err(OrientationError::InvalidPosition(_))));
    }

    #[test]
    fn parses_orientation_names() {
        assert_eq!("Vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert_eq!("h".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert!(matches!(
            "diagonal".parse::<Orientation>(),
            Err(OrientationError::InvalidOrientation(_))
        ));
    }

    #[test]
    fn parses_positions() {
        assert_eq!("300".parse::<Position>(), Ok(Position::Scalar(300.0)));
        assert_eq!(
            "4, 9".parse::<Position>(),
            Ok(Position::Point(Point { x: 4.0, y: 9.0 }))
        );
        assert!("a,b".parse::<Position>().is_err());
        assert!("1,2,3".parse::<Position>().is_err());
    }

    #[test]
    fn position_deserializes_from_number_or_object() {
        let scalar: Position = serde_json::from_str("42").unwrap();
        assert_eq!(scalar, Position::Scalar(42.0));
        let point: Position = serde_json::from_str(r#"{"x": 1, "y": 2}"#).unwrap();
        assert_eq!(point, Position::Point(Point { x: 1.0, y: 2.0 }));
        assert!(serde_json::from_str::<Position>(r#""nope""#).is_err());
    }

    #[test]
    fn translate_places_value_on_main_axis() {
        let vertical = translate(Orientation::Vertical, 468.5);
        assert_eq!(vertical.to_string(), "translate3d(0px, 468.5px, 0px)");
        let horizontal = translate(Orientation::Horizontal, -3.0);
        assert_eq!(horizontal.to_string(), "translate3d(-3px, 0px, 0px)");
        assert_eq!(horizontal.value, -3.0);
    }

    #[test]
    fn format_px_trims_trailing_zeros() {
        assert_eq!(format_px(1.0 / 3.0), "0.333");
        assert_eq!(format_px(10.0), "10");
        assert_eq!(format_px(-0.0001), "0");
    }
}
