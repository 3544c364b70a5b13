use crate::types::ExtractionResult;

/// Format seconds as `m:ss`, or `h:mm:ss` once an hour is reached.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Format transcript segments with timestamps, one per line
pub fn format_transcript_with_timestamps(result: &ExtractionResult) -> String {
    result
        .segments
        .iter()
        .map(|seg| format!("[{}] {}", seg.formatted_time, seg.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format an extraction result as human-readable markdown
pub fn format_result_readable(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# {}\n\n",
        result.video_id.as_deref().unwrap_or("Unknown video")
    ));

    output.push_str(&format!(
        "**URL:** {} | **Segments:** {} | **Duration:** {} | **Comments:** {}\n\n",
        result.video_url,
        result.segments.len(),
        format_time(result.transcript_duration()),
        result.comments.len()
    ));

    if let Some(thumbnail) = &result.thumbnail_url {
        output.push_str(&format!("**Thumbnail:** {}\n\n", thumbnail));
    }

    output.push_str("## Transcript\n\n");
    if result.segments.is_empty() {
        output.push_str("_No transcript available._\n");
    } else {
        output.push_str(&format_transcript_with_timestamps(result));
        output.push('\n');
    }
    output.push('\n');

    if !result.comments.is_empty() {
        output.push_str("## Comments\n\n");
        for comment in &result.comments {
            output.push_str(&format!("• {}\n", comment.replace('\n', " ")));
        }
        output.push('\n');
    }

    output
}
