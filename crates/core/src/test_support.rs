//! In-memory [`Transport`] with scripted replies, for unit tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    error::{ExtractError, Result},
    transport::Transport,
};

pub enum Reply {
    Json(Value),
    Text(String),
    Status(u16),
    /// Never answers; only a timeout or cancellation ends the call.
    Hang,
}

type Handler = Arc<dyn Fn(&Value) -> Reply + Send + Sync>;

#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<(String, Handler)>>,
    requested: Mutex<Vec<String>>,
    posted: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL starts with `prefix`. The handler sees the
    /// POST body (`null` for GET). Earlier routes win.
    pub fn route(&self, prefix: &str, handler: impl Fn(&Value) -> Reply + Send + Sync + 'static) {
        self.routes
            .lock()
            .unwrap()
            .push((prefix.to_string(), Arc::new(handler)));
    }

    pub fn respond_json(&self, prefix: &str, value: Value) {
        self.route(prefix, move |_| Reply::Json(value.clone()));
    }

    pub fn respond_text(&self, prefix: &str, text: &str) {
        let text = text.to_string();
        self.route(prefix, move |_| Reply::Text(text.clone()));
    }

    pub fn respond_status(&self, prefix: &str, status: u16) {
        self.route(prefix, move |_| Reply::Status(status));
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn posted_bodies(&self) -> Vec<Value> {
        self.posted.lock().unwrap().clone()
    }

    async fn dispatch(&self, url: &str, body: &Value, timeout: Duration) -> Result<Reply> {
        self.requested.lock().unwrap().push(url.to_string());

        let handler = self
            .routes
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, h)| Arc::clone(h));

        let reply = match handler {
            Some(handler) => handler(body),
            None => Reply::Status(404),
        };

        match reply {
            Reply::Hang => {
                tokio::time::sleep(timeout).await;
                Err(ExtractError::Timeout {
                    url: url.to_string(),
                })
            }
            Reply::Status(status) if !(200..300).contains(&status) => Err(ExtractError::Status {
                url: url.to_string(),
                status,
            }),
            other => Ok(other),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String> {
        match self.dispatch(url, &Value::Null, timeout).await? {
            Reply::Text(text) => Ok(text),
            Reply::Json(value) => Ok(value.to_string()),
            _ => Ok(String::new()),
        }
    }

    async fn post_json(&self, url: &str, body: &Value, timeout: Duration) -> Result<Value> {
        self.posted.lock().unwrap().push(body.clone());
        match self.dispatch(url, body, timeout).await? {
            Reply::Json(value) => Ok(value),
            Reply::Text(text) => Ok(serde_json::from_str(&text)?),
            _ => Ok(Value::Null),
        }
    }
}

/// A `get_transcript` response wrapping `items` as `initialSegments`.
pub fn transcript_response(items: Value) -> Value {
    json!({
        "responseContext": {},
        "actions": [{
            "updateEngagementPanelAction": {
                "content": {"transcriptRenderer": {"content": {"transcriptSearchPanelRenderer": {
                    "body": {"transcriptSegmentListRenderer": {"initialSegments": items}}
                }}}}
            }
        }]
    })
}

/// A raw transcript item as the platform sends it.
pub fn raw_segment(start_ms: &str, end_ms: &str, text: &str) -> Value {
    json!({
        "transcriptSegmentRenderer": {
            "startMs": start_ms,
            "endMs": end_ms,
            "snippet": {"runs": [{"text": text}]}
        }
    })
}

/// A `next` response carrying `comments` and, optionally, a follow-up token.
pub fn comments_page(comments: &[&str], next_token: Option<&str>) -> Value {
    let mutations: Vec<Value> = comments
        .iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "entityKey": format!("key-{i}"),
                "payload": {"commentEntityPayload": {
                    "key": format!("key-{i}"),
                    "properties": {"content": {"content": text}}
                }}
            })
        })
        .collect();

    let continuation_items: Vec<Value> = next_token
        .map(|token| {
            json!({"continuationItemRenderer": {
                "continuationEndpoint": {"continuationCommand": {
                    "token": token,
                    "request": "CONTINUATION_REQUEST_TYPE_WATCH_NEXT"
                }}
            }})
        })
        .into_iter()
        .collect();

    json!({
        "onResponseReceivedEndpoints": [{
            "reloadContinuationItemsCommand": {
                "targetId": "comments-section",
                "continuationItems": continuation_items
            }
        }],
        "frameworkUpdates": {"entityBatchUpdate": {"mutations": mutations}}
    })
}

/// A watch page embedding the three blobs the scraper looks for.
pub fn watch_page(initial_data: &Value, player_response: &Value, client_config: &Value) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><script>ytcfg.set({client_config});</script></head><body>
<script>var ytInitialPlayerResponse = {player_response};var meta = document.createElement('meta');</script>
<script>var ytInitialData = {initial_data};</script>
</body></html>"#
    )
}
