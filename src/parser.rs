use anyhow::Result;
use serde::Deserialize;

use crate::ir::{SegmentInput, Timeline, Timestamp};

#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentDocument {
    List(Timeline),
    Wrapped { segments: Timeline },
}

impl SegmentDocument {
    fn into_timeline(self) -> Timeline {
        match self {
            SegmentDocument::List(timeline) => timeline,
            SegmentDocument::Wrapped { segments } => segments,
        }
    }
}

/// Reads a segment list.
///
/// Accepts a JSON (or JSON5) array of `{timestamp, numRecords}` objects, an
/// object wrapping that array under `segments`, or plain text with one
/// `<timestamp> <numRecords>` pair per line.
pub fn parse_segments(input: &str) -> Result<Timeline> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return parse_document(trimmed);
    }
    parse_lines(input)
}

fn parse_document(input: &str) -> Result<Timeline> {
    match serde_json::from_str::<SegmentDocument>(input) {
        Ok(doc) => Ok(doc.into_timeline()),
        Err(json_err) => json5::from_str::<SegmentDocument>(input)
            .map(SegmentDocument::into_timeline)
            .map_err(|json5_err| {
                anyhow::anyhow!("invalid segment list: {json_err} (as JSON5: {json5_err})")
            }),
    }
}

fn parse_lines(input: &str) -> Result<Timeline> {
    let mut timeline = Timeline::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let Some((timestamp, count)) = line.rsplit_once(char::is_whitespace) else {
            return Err(anyhow::anyhow!(
                "line {}: expected '<timestamp> <numRecords>'",
                idx + 1
            ));
        };
        let num_records: u64 = count.parse().map_err(|_| {
            anyhow::anyhow!("line {}: invalid record count '{}'", idx + 1, count)
        })?;
        timeline.segments.push(SegmentInput {
            timestamp: Timestamp::Text(timestamp.trim().to_string()),
            num_records,
        });
    }
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_array() {
        let timeline =
            parse_segments(r#"[{"timestamp": "2024-01-01", "numRecords": 8}]"#).unwrap();
        assert_eq!(timeline.segments.len(), 1);
        assert_eq!(timeline.segments[0].num_records, 8);
    }

    #[test]
    fn parses_wrapped_json5() {
        let timeline = parse_segments(
            "{ segments: [ { timestamp: 1704067200000, numRecords: 2 }, ], }",
        )
        .unwrap();
        assert_eq!(timeline.segments[0].timestamp, Timestamp::Millis(1_704_067_200_000));
    }

    #[test]
    fn parses_text_lines() {
        let input = "# exported counts\n2024-01-01 8\n\n2023-02-15 10:30 3  # afternoon\n";
        let timeline = parse_segments(input).unwrap();
        assert_eq!(timeline.segments.len(), 2);
        assert_eq!(
            timeline.segments[1].timestamp,
            Timestamp::from("2023-02-15 10:30")
        );
        assert_eq!(timeline.segments[1].num_records, 3);
    }

    #[test]
    fn reports_bad_lines() {
        let err = parse_segments("2024-01-01 8\n2024-02-01 lots\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
        assert!(parse_segments("2024-01-01\n").is_err());
    }

    #[test]
    fn invalid_documents_report_both_parsers() {
        let err = parse_segments("[{ timestamp: '2024-01-01', numRecords: }]").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid segment list: "), "{message}");
        assert!(message.contains("(as JSON5: "), "{message}");
    }

    #[test]
    fn empty_input_is_empty_timeline() {
        assert!(parse_segments("").unwrap().segments.is_empty());
    }
}
