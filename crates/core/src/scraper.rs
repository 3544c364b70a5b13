use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::Result, transport::Transport};

static INITIAL_DATA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:var\s+ytInitialData|window\[["']ytInitialData["']\])\s*=\s*\{"#)
        .expect("initial data regex is valid")
});

static PLAYER_RESPONSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:var\s+ytInitialPlayerResponse|window\[["']ytInitialPlayerResponse["']\])\s*=\s*\{"#,
    )
    .expect("player response regex is valid")
});

static CLIENT_CONFIG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ytcfg\.set\(\s*\{").expect("client config regex is valid")
});

static VIDEO_ID_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""videoId"\s*:\s*"([^"]+)""#).expect("video id literal regex is valid")
});

/// JSON blobs embedded in a watch page. Each one is independently optional.
#[derive(Debug, Default, Clone)]
pub struct ScrapedDocument {
    /// `ytInitialData`: page layout, including the transcript and comment tokens.
    pub initial_data: Option<Value>,
    /// `ytInitialPlayerResponse`: carries the `responseContext` fragment.
    pub player_response: Option<Value>,
    /// The object passed to `ytcfg.set(...)`.
    pub client_config: Option<Value>,
    /// First `"videoId"` literal in the markup.
    pub external_video_id: Option<String>,
}

/// Fetch a watch page and pull the embedded blobs out of it.
pub async fn scrape(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
) -> Result<ScrapedDocument> {
    let html = transport.get_text(url, timeout).await?;
    debug!(url, bytes = html.len(), "fetched watch page");
    Ok(parse_document(&html))
}

/// Extract every known blob from raw markup. Never fails; missing or broken
/// blobs are left as `None`.
pub fn parse_document(html: &str) -> ScrapedDocument {
    ScrapedDocument {
        initial_data: extract_blob(html, &INITIAL_DATA_REGEX, "ytInitialData"),
        player_response: extract_blob(html, &PLAYER_RESPONSE_REGEX, "ytInitialPlayerResponse"),
        client_config: extract_blob(html, &CLIENT_CONFIG_REGEX, "ytcfg"),
        external_video_id: VIDEO_ID_LITERAL_REGEX
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    }
}

/// Parse the object that opens at the end of each `pattern` match, returning
/// the first one that is valid JSON.
fn extract_blob(html: &str, pattern: &Regex, name: &str) -> Option<Value> {
    let mut attempts = 0;
    for m in pattern.find_iter(html) {
        attempts += 1;
        // The match ends just past the opening brace.
        let start = m.end() - 1;
        match parse_leading_value(&html[start..]) {
            Ok(value) => {
                debug!(blob = name, offset = start, "parsed embedded blob");
                return Some(value);
            }
            Err(e) => debug!(blob = name, offset = start, error = %e, "unparseable blob"),
        }
    }

    if attempts == 0 {
        debug!(blob = name, "blob not present in page");
    } else {
        warn!(blob = name, attempts, "blob present but never parsed");
    }
    None
}

/// Parse one JSON value from the start of `text`, ignoring whatever follows it.
fn parse_leading_value(text: &str) -> serde_json::Result<Value> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<Value>();
    match stream.next() {
        Some(result) => result,
        None => serde_json::from_str(""),
    }
}
