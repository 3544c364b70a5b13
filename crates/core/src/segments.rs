use serde_json::Value;

use crate::{format::format_time, json::array_at, types::TranscriptSegment};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedTranscript {
    pub transcript_text: String,
    pub segments: Vec<TranscriptSegment>,
}

/// Turn raw `initialSegments` items into timestamped segments.
///
/// Items without text (section headers, empty cues) are dropped. Offsets are
/// millisecond strings; anything missing or unparseable counts as zero and
/// durations never go below zero. Segments are kept in source order unless the
/// source itself is out of order, in which case they are stably re-sorted by
/// start time.
pub fn process_segments(raw: &[Value]) -> ProcessedTranscript {
    let mut segments: Vec<TranscriptSegment> = raw.iter().filter_map(process_one).collect();
    segments.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let transcript_text = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    ProcessedTranscript {
        transcript_text,
        segments,
    }
}

fn process_one(item: &Value) -> Option<TranscriptSegment> {
    let renderer = item.get("transcriptSegmentRenderer")?;

    let text = snippet_text(renderer);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let start_time = millis(renderer.get("startMs")) / 1000.0;
    let end_time = millis(renderer.get("endMs")) / 1000.0;

    Some(TranscriptSegment {
        text: text.to_string(),
        start_time,
        duration: (end_time - start_time).max(0.0),
        formatted_time: format_time(start_time),
    })
}

fn snippet_text(renderer: &Value) -> String {
    let runs: String = array_at(renderer, "/snippet/runs")
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();
    if !runs.is_empty() {
        return runs;
    }

    renderer
        .pointer("/snippet/simpleText")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn millis(value: Option<&Value>) -> f64 {
    let ms = match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    ms.filter(|ms| ms.is_finite() && *ms >= 0.0).unwrap_or(0.0)
}
