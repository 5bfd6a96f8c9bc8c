use crate::error::LayoutError;
use crate::geometry::Orientation;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry of the axis the segments are laid out on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Total axis length in pixels.
    pub line_segment: f64,
    pub orientation: Orientation,
    pub start_offset: f64,
    pub end_offset: f64,
    /// Width of the circular marker drawn between segments.
    pub delimiter_width: f64,
    /// Room reserved at a year boundary for the year label.
    pub label_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_segment: 1000.0,
            orientation: Orientation::Vertical,
            start_offset: 24.0,
            end_offset: 24.0,
            delimiter_width: 6.0,
            label_spacing: 20.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("lineSegment", self.line_segment),
            ("startOffset", self.start_offset),
            ("endOffset", self.end_offset),
            ("delimiterWidth", self.delimiter_width),
            ("labelSpacing", self.label_spacing),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(LayoutError::NonFinite { field });
            }
        }
        if self.line_segment <= 0.0 {
            return Err(LayoutError::InvalidLength(self.line_segment));
        }
        for &(field, value) in &fields[1..] {
            if value < 0.0 {
                return Err(LayoutError::NegativeSpacing { field, value });
            }
        }
        if self.start_offset + self.end_offset >= self.line_segment {
            return Err(LayoutError::OffsetsExceedLength {
                start: self.start_offset,
                end: self.end_offset,
                length: self.line_segment,
            });
        }
        Ok(())
    }

    /// Axis length left once both offsets are removed.
    pub fn max_space_available(&self) -> f64 {
        self.line_segment - self.start_offset - self.end_offset
    }

    pub fn delimiter_radius(&self) -> f64 {
        self.delimiter_width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelFormat {
    /// Month name and year, e.g. "January 2024".
    #[default]
    MonthYear,
    /// ISO date, e.g. "2024-01-31".
    Date,
    Year,
}

impl LabelFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            LabelFormat::MonthYear => "%B %Y",
            LabelFormat::Date => "%Y-%m-%d",
            LabelFormat::Year => "%Y",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointerConfig {
    pub label_format: LabelFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub layout: LayoutConfig,
    pub pointer: PointerConfig,
}

/// On-disk shape. Every field is optional and overlays the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    line_segment: Option<f64>,
    orientation: Option<String>,
    start_offset: Option<f64>,
    end_offset: Option<f64>,
    delimiter_width: Option<f64>,
    label_spacing: Option<f64>,
    label_format: Option<LabelFormat>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed = parse_config_file(&contents)?;

    if let Some(v) = parsed.line_segment {
        config.layout.line_segment = v;
    }
    if let Some(v) = parsed.orientation.as_deref() {
        config.layout.orientation = v.parse()?;
    }
    if let Some(v) = parsed.start_offset {
        config.layout.start_offset = v;
    }
    if let Some(v) = parsed.end_offset {
        config.layout.end_offset = v;
    }
    if let Some(v) = parsed.delimiter_width {
        config.layout.delimiter_width = v;
    }
    if let Some(v) = parsed.label_spacing {
        config.layout.label_spacing = v;
    }
    if let Some(v) = parsed.label_format {
        config.pointer.label_format = v;
    }

    config.layout.validate()?;
    Ok(config)
}

fn parse_config_file(contents: &str) -> anyhow::Result<ConfigFile> {
    match serde_json::from_str(contents) {
        Ok(parsed) => Ok(parsed),
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config file: {json_err} (as JSON5: {json5_err})")
        }),
    }
}
