//! Fixtures shared by the HTTP-level tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path, query_param},
};

pub const VIDEO_ID: &str = "dQw4w9WgXcQ";

pub fn watch_page() -> String {
    let initial_data = json!({
        "engagementPanels": [{"engagementPanelSectionListRenderer": {
            "panelIdentifier": "engagement-panel-searchable-transcript",
            "content": {"continuationItemRenderer": {"continuationEndpoint": {
                "getTranscriptEndpoint": {"params": "CgtkUXc0dzlXZ1hjUQ"}
            }}}
        }}],
        "contents": {"twoColumnWatchNextResults": {"results": {"results": {"contents": [
            {"itemSectionRenderer": {
                "sectionIdentifier": "comment-item-section",
                "contents": [{"continuationItemRenderer": {"continuationEndpoint": {
                    "continuationCommand": {
                        "token": "Eg0SC2RRdzR3OVdnWGNR",
                        "request": "CONTINUATION_REQUEST_TYPE_WATCH_NEXT"
                    }
                }}}]
            }}
        ]}}}}
    });
    let player = json!({
        "responseContext": {"visitorData": "CgtWaXNpdG9y", "serviceTrackingParams": []},
        "videoDetails": {"videoId": VIDEO_ID, "title": "Never Gonna Give You Up"}
    });
    let config = json!({
        "HL": "en",
        "GL": "GB",
        "VISITOR_DATA": "CgtWaXNpdG9y",
        "INNERTUBE_CONTEXT_CLIENT_NAME": 1,
        "INNERTUBE_CONTEXT_CLIENT_VERSION": "2.20240101.00.00"
    });

    format!(
        r#"<!DOCTYPE html><html lang="en"><head>
<script nonce="n1">ytcfg.set({config}); window.ytcfg.obfuscatedData_ = [];</script>
</head><body>
<script nonce="n2">var ytInitialPlayerResponse = {player};var meta = document.createElement('meta');</script>
<script nonce="n3">var ytInitialData = {initial_data};</script>
</body></html>"#
    )
}

pub fn transcript_response() -> Value {
    let segment = |start: &str, end: &str, text: &str| {
        json!({"transcriptSegmentRenderer": {
            "startMs": start,
            "endMs": end,
            "snippet": {"runs": [{"text": text}]}
        }})
    };

    json!({
        "responseContext": {},
        "actions": [{"updateEngagementPanelAction": {"content": {"transcriptRenderer": {"content": {
            "transcriptSearchPanelRenderer": {"body": {"transcriptSegmentListRenderer": {
                "initialSegments": [
                    segment("0", "1500", "We're no strangers"),
                    segment("1500", "4000", "to love"),
                    segment("4000", "7000", "You know the rules"),
                ]
            }}}
        }}}}}]
    })
}

pub fn comments_page(comments: &[&str], next_token: Option<&str>) -> Value {
    let mutations: Vec<Value> = comments
        .iter()
        .map(|text| {
            json!({"payload": {"commentEntityPayload": {
                "properties": {"content": {"content": text}}
            }}})
        })
        .collect();
    let items: Vec<Value> = next_token
        .into_iter()
        .map(|token| {
            json!({"continuationItemRenderer": {"continuationEndpoint": {
                "continuationCommand": {"token": token}
            }}})
        })
        .collect();

    json!({
        "onResponseReceivedEndpoints": [{"reloadContinuationItemsCommand": {"continuationItems": items}}],
        "frameworkUpdates": {"entityBatchUpdate": {"mutations": mutations}}
    })
}

pub async fn mount_watch_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/watch"))
        .and(query_param("v", VIDEO_ID))
        .respond_with(ResponseTemplate::new(200).set_body_string(watch_page()))
        .mount(server)
        .await;
}

pub async fn mount_transcript(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/get_transcript"))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Two comment pages: the seed page and one follow-up, with one repeat.
pub async fn mount_comment_pages(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/next"))
        .and(body_partial_json(json!({"continuation": "Eg0SC2RRdzR3OVdnWGNR"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(comments_page(&["classic", "still good"], Some("PAGE_2"))),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/youtubei/v1/next"))
        .and(body_partial_json(json!({"continuation": "PAGE_2"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(comments_page(&["classic", "2024 anyone?"], None)),
        )
        .mount(server)
        .await;
}
