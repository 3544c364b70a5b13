use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{context::SessionContext, error::Result, json::find_key_with_path, transport::Transport};

const TRANSCRIPT_ENDPOINT_KEY: &str = "getTranscriptEndpoint";

/// Where the segment list sits inside a `get_transcript` response.
const SEGMENTS_POINTER: &str = "/actions/0/updateEngagementPanelAction/content/transcriptRenderer/content/transcriptSearchPanelRenderer/body/transcriptSegmentListRenderer/initialSegments";

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptOutcome {
    /// Raw `initialSegments` items, in response order.
    Segments(Vec<Value>),
    /// The response did not contain a segment list.
    Unavailable,
}

/// Find the opaque `params` token for the transcript request.
pub fn find_transcript_params(initial_data: &Value) -> Option<String> {
    let (path, endpoint) = find_key_with_path(initial_data, TRANSCRIPT_ENDPOINT_KEY)?;
    let params = endpoint.get("params").and_then(Value::as_str)?;
    debug!(%path, "found transcript endpoint");
    Some(params.to_string())
}

/// Request the transcript for a video.
///
/// A response that does not have the expected shape is
/// [`TranscriptOutcome::Unavailable`]; only transport and JSON failures are
/// errors.
pub async fn fetch_transcript(
    transport: &dyn Transport,
    endpoint: &str,
    context: &SessionContext,
    params: &str,
    video_id: &str,
    timeout: Duration,
) -> Result<TranscriptOutcome> {
    let body = json!({
        "context": context,
        "params": params,
        "externalVideoId": video_id,
    });

    let response = transport.post_json(endpoint, &body, timeout).await?;
    let outcome = segments_from_response(&response);

    match &outcome {
        TranscriptOutcome::Segments(items) => debug!(items = items.len(), "transcript received"),
        TranscriptOutcome::Unavailable => info!(video_id, "no transcript segments in response"),
    }

    Ok(outcome)
}

/// Walk the fixed path down to `initialSegments`.
pub fn segments_from_response(response: &Value) -> TranscriptOutcome {
    match response.pointer(SEGMENTS_POINTER).and_then(Value::as_array) {
        Some(items) => TranscriptOutcome::Segments(items.clone()),
        None => TranscriptOutcome::Unavailable,
    }
}
