use std::{future::Future, sync::Arc};

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::{
    comments::{find_comments_seed, paginate_comments},
    config::ExtractorConfig,
    context::{SessionContext, build_context},
    error::{ExtractError, Result},
    scraper::{ScrapedDocument, scrape},
    segments::{ProcessedTranscript, process_segments},
    thumbnail::thumbnail_url,
    transcript::{TranscriptOutcome, fetch_transcript, find_transcript_params},
    transport::{HttpTransport, Transport},
    types::{ExtractionResult, VideoReference},
    video_url::normalize,
};

/// An [`ExtractionResult`] plus how the run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub result: ExtractionResult,
    /// The watch page was fetched. When false, the result is the minimal
    /// fallback and says nothing about the video itself.
    pub page_loaded: bool,
    pub cancelled: bool,
}

impl ExtractionReport {
    /// Whether the result describes the video rather than a failed or
    /// interrupted run.
    pub fn is_complete(&self) -> bool {
        self.page_loaded && !self.cancelled
    }
}

/// Runs the whole transcript-and-comments extraction for a video URL.
///
/// Holds no per-request state, so one extractor can serve concurrent
/// extractions.
#[derive(Clone)]
pub struct Extractor {
    transport: Arc<dyn Transport>,
    config: ExtractorConfig,
}

impl Extractor {
    /// Extractor talking to the real platform over HTTP.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.profile.config().user_agent)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, config: ExtractorConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub async fn extract(&self, url: &str) -> ExtractionResult {
        self.extract_with_cancel(url, &CancellationToken::new()).await
    }

    /// Extract, stopping early when `cancel` fires.
    ///
    /// Never fails: every stage degrades to an empty part of the result, and
    /// cancellation returns whatever was gathered before it.
    pub async fn extract_with_cancel(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ExtractionResult {
        self.extract_report(url, cancel).await.result
    }

    /// Like [`extract_with_cancel`](Self::extract_with_cancel), but also tells
    /// a fallback result apart from a real one.
    pub async fn extract_report(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> ExtractionReport {
        let id = Uuid::new_v4();
        let span = info_span!("extract", %id, url);
        let (result, page_loaded) = self.run(url, cancel).instrument(span).await;
        ExtractionReport {
            result,
            page_loaded,
            cancelled: cancel.is_cancelled(),
        }
    }

    /// Returns the result and whether the watch page was fetched.
    async fn run(&self, url: &str, cancel: &CancellationToken) -> (ExtractionResult, bool) {
        let video = normalize(url);
        let thumbnail = thumbnail_url(video.video_id.as_deref());
        let mut result = ExtractionResult::empty(&video, thumbnail);

        let Some(video_id) = video.video_id.as_deref() else {
            info!("not a video URL, nothing to extract");
            return (result, false);
        };

        let watch_url = self.config.watch_url(video_id);
        let doc = match guarded(
            cancel,
            scrape(self.transport.as_ref(), &watch_url, self.config.document_timeout),
        )
        .await
        {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "watch page unavailable, returning empty result");
                return (result, false);
            }
        };

        let context = build_context(
            doc.client_config.as_ref(),
            doc.player_response.as_ref(),
            &video.normalized_url,
            self.config.profile,
        );

        let transcript = self.transcript(&doc, &video, &context, cancel).await;
        result.transcript_text = transcript.transcript_text;
        result.segments = transcript.segments;

        let seed = doc.initial_data.as_ref().and_then(find_comments_seed);
        if cancel.is_cancelled() {
            return (result, true);
        }
        result.comments = paginate_comments(
            self.transport.as_ref(),
            &self.config.next_endpoint(),
            &context,
            seed,
            self.config.max_comment_pages,
            self.config.page_timeout,
            cancel,
        )
        .await;

        info!(
            segments = result.segments.len(),
            comments = result.comments.len(),
            "extraction finished"
        );
        (result, true)
    }

    async fn transcript(
        &self,
        doc: &ScrapedDocument,
        video: &VideoReference,
        context: &SessionContext,
        cancel: &CancellationToken,
    ) -> ProcessedTranscript {
        let Some(params) = doc.initial_data.as_ref().and_then(find_transcript_params) else {
            info!("page has no transcript endpoint");
            return ProcessedTranscript::default();
        };

        let Some(video_id) = doc
            .external_video_id
            .as_deref()
            .or(video.video_id.as_deref())
        else {
            return ProcessedTranscript::default();
        };

        let endpoint = self.config.transcript_endpoint();
        let fetched = guarded(
            cancel,
            fetch_transcript(
                self.transport.as_ref(),
                &endpoint,
                context,
                &params,
                video_id,
                self.config.transcript_timeout,
            ),
        )
        .await;

        match fetched {
            Ok(TranscriptOutcome::Segments(raw)) => {
                let processed = process_segments(&raw);
                debug!(segments = processed.segments.len(), "transcript processed");
                processed
            }
            Ok(TranscriptOutcome::Unavailable) => ProcessedTranscript::default(),
            Err(e) => {
                warn!(error = %e, "transcript request failed, continuing without it");
                ProcessedTranscript::default()
            }
        }
    }
}

/// Run `fut` unless `cancel` fires first.
async fn guarded<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ExtractError::Cancelled),
        result = fut => result,
    }
}
