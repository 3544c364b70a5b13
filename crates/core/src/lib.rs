//! Captionist Core Library
//!
//! Pulls timestamped transcripts and a bounded, deduplicated set of comments
//! out of YouTube watch pages by replaying the web client's internal requests.
//! Every stage is best-effort: a missing piece leaves an empty field in the
//! [`ExtractionResult`] instead of failing the extraction.

pub mod cache;
pub mod comments;
pub mod config;
pub mod context;
pub mod error;
pub mod extractor;
pub mod format;
pub mod json;
pub mod profile;
pub mod scraper;
pub mod segments;
pub mod thumbnail;
pub mod transcript;
pub mod transport;
pub mod types;
pub mod video_url;

#[cfg(test)]
mod test_support;

// Re-export commonly used items at crate root
pub use cache::{get_cache_dir, get_result_path, get_root_cache_dir, load_result, save_result};
pub use comments::{CommentPage, find_comments_seed, paginate_comments, parse_comment_page};
pub use config::ExtractorConfig;
pub use context::{SessionContext, build_context};
pub use error::{ExtractError, Result};
pub use extractor::{ExtractionReport, Extractor};
pub use format::{format_result_readable, format_time, format_transcript_with_timestamps};
pub use profile::{ClientProfile, ProfileConfig};
pub use scraper::{ScrapedDocument, parse_document, scrape};
pub use segments::{ProcessedTranscript, process_segments};
pub use thumbnail::thumbnail_url;
pub use transcript::{
    TranscriptOutcome, fetch_transcript, find_transcript_params, segments_from_response,
};
pub use transport::{HttpTransport, Transport};
pub use types::{ExtractionResult, TranscriptSegment, VideoReference};
pub use video_url::{extract_video_id, is_video_url, normalize, timestamp_url};

/// Re-exported so callers can cancel without depending on `tokio-util` directly.
pub use tokio_util::sync::CancellationToken;
