use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::profile::ClientProfile;

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
pub const DEFAULT_MAX_COMMENT_PAGES: usize = 5;

/// Knobs for one [`Extractor`](crate::Extractor).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Scheme and host of the video platform, without a trailing slash.
    pub base_url: String,
    #[serde(with = "secs")]
    pub document_timeout: Duration,
    #[serde(with = "secs")]
    pub transcript_timeout: Duration,
    /// Applied to each comment page separately.
    #[serde(with = "secs")]
    pub page_timeout: Duration,
    pub max_comment_pages: usize,
    pub profile: ClientProfile,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            document_timeout: Duration::from_secs(15),
            transcript_timeout: Duration::from_secs(15),
            page_timeout: Duration::from_secs(8),
            max_comment_pages: DEFAULT_MAX_COMMENT_PAGES,
            profile: ClientProfile::default(),
        }
    }
}

impl ExtractorConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn watch_url(&self, video_id: &str) -> String {
        format!("{}/watch?v={}", self.base_url, video_id)
    }

    pub fn transcript_endpoint(&self) -> String {
        format!("{}/youtubei/v1/get_transcript?prettyPrint=false", self.base_url)
    }

    pub fn next_endpoint(&self) -> String {
        format!("{}/youtubei/v1/next?prettyPrint=false", self.base_url)
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
