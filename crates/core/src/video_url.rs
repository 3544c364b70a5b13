use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::{
    error::{ExtractError, Result},
    types::VideoReference,
};

const SHORT_LINK_MARKER: &str = "youtu.be/";
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Long-form, embed-form and short-link shapes, capturing the 11-char id.
static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts|live)/|.*[?&]v=)|youtu\.be/)([^"&?/#\s]{11})"#,
    )
    .expect("video id regex is valid")
});

/// Canonicalize a video URL and pull out its identifier.
///
/// Short links are rewritten to the long watch form. A URL that matches no
/// known shape yields `video_id: None`, which callers treat as "nothing to
/// extract", not as a failure.
pub fn normalize(url: &str) -> VideoReference {
    let normalized_url = rewrite_short_link(url.trim());
    let video_id = extract_video_id(&normalized_url);
    VideoReference {
        video_id,
        normalized_url,
    }
}

fn rewrite_short_link(url: &str) -> String {
    let Some((_, rest)) = url.split_once(SHORT_LINK_MARKER) else {
        return url.to_string();
    };

    let id = rest
        .split(['?', '&', '#', '/'])
        .next()
        .unwrap_or_default();
    format!("{WATCH_URL_PREFIX}{id}")
}

/// Extract the 11-character video identifier from any known URL shape.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether `url` looks like a link to a single video.
pub fn is_video_url(url: &str) -> bool {
    VIDEO_ID_REGEX.is_match(url.trim())
}

/// Watch URL that starts playback at `seconds` (fractions are dropped).
///
/// Any existing `t` parameter is replaced; other parameters are kept.
pub fn timestamp_url(video_url: &str, seconds: f64) -> Result<String> {
    let normalized = rewrite_short_link(video_url.trim());
    let mut url = Url::parse(&normalized).map_err(|e| ExtractError::InvalidUrl {
        url: normalized.clone(),
        reason: e.to_string(),
    })?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "t")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let secs = seconds.max(0.0).floor() as u64;
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("t", &format!("{secs}s"));

    Ok(url.to_string())
}
