use crate::geometry::Orientation;
use crate::layout::{Segment, TimelineLayout};
use crate::pointer::PointerHit;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub orientation: Orientation,
    pub line_segment: f64,
    pub max_space_available: f64,
    pub delimiter_radius: f64,
    pub usable_span: f64,
    pub num_records: u64,
    pub segments: Vec<Segment>,
    pub year_groups: Vec<YearGroupDump>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<QueryDump>,
}

/// A year group by reference: `first` and `segments` are input indices,
/// matching `Segment::index`.
#[derive(Debug, Serialize)]
pub struct YearGroupDump {
    pub year: i32,
    pub first: usize,
    pub segments: Vec<usize>,
    pub num_records: u64,
}

#[derive(Debug, Serialize)]
pub struct QueryDump {
    pub query: String,
    pub hit: Option<PointerHit>,
}

impl LayoutDump {
    pub fn from_layout(layout: &TimelineLayout) -> Self {
        let year_groups = layout
            .segment_groups()
            .iter()
            .map(|group| YearGroupDump {
                year: group.year,
                first: group.first.index,
                segments: group.segments.iter().map(|s| s.index).collect(),
                num_records: group.num_records(),
            })
            .collect();

        LayoutDump {
            orientation: layout.config().orientation,
            line_segment: layout.config().line_segment,
            max_space_available: layout.max_space_available(),
            delimiter_radius: layout.delimiter_radius(),
            usable_span: layout.usable_span(),
            num_records: layout.num_records(),
            segments: layout.segments().to_vec(),
            year_groups,
            queries: Vec::new(),
        }
    }
}

pub fn write_layout_dump(path: &Path, dump: &LayoutDump) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}
