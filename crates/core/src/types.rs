use serde::{Deserialize, Serialize};

/// A video URL after normalization, with the identifier it points at (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoReference {
    pub video_id: Option<String>,
    pub normalized_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegment {
    pub text: String,
    pub start_time: f64,
    pub duration: f64,
    pub formatted_time: String,
}

/// Everything one extraction produced. Missing parts are empty, never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub transcript_text: String,
    pub segments: Vec<TranscriptSegment>,
    pub comments: Vec<String>,
    pub video_id: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
}

impl ExtractionResult {
    /// A structurally valid result with no transcript and no comments.
    pub fn empty(video: &VideoReference, thumbnail_url: Option<String>) -> Self {
        Self {
            transcript_text: String::new(),
            segments: Vec::new(),
            comments: Vec::new(),
            video_id: video.video_id.clone(),
            video_url: video.normalized_url.clone(),
            thumbnail_url,
        }
    }

    /// Duration covered by the transcript, from the last segment's end.
    pub fn transcript_duration(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.start_time + s.duration)
            .unwrap_or(0.0)
    }
}
