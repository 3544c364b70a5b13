use std::{collections::HashSet, time::Duration};

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    context::SessionContext,
    json::{array_at, find_map},
    transport::Transport,
};

const WATCH_NEXT_REQUEST: &str = "CONTINUATION_REQUEST_TYPE_WATCH_NEXT";

/// Find the token that opens the comment section on a watch page.
///
/// This is a separate search from the transcript token: it looks for a
/// `continuationCommand` whose `request` is the watch-next type.
pub fn find_comments_seed(initial_data: &Value) -> Option<String> {
    find_map(initial_data, &|node: &Value| {
        let command = node.get("continuationCommand")?;
        if command.get("request").and_then(Value::as_str) != Some(WATCH_NEXT_REQUEST) {
            return None;
        }
        command
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

/// What one `next` response contributed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentPage {
    pub comments: Vec<String>,
    pub next_token: Option<String>,
}

/// Pull comment bodies and the follow-up token out of a `next` response.
///
/// Returns `None` when the response is not a JSON object at all.
pub fn parse_comment_page(response: &Value) -> Option<CommentPage> {
    if !response.is_object() {
        return None;
    }

    let comments = array_at(response, "/frameworkUpdates/entityBatchUpdate/mutations")
        .filter_map(|m| {
            m.pointer("/payload/commentEntityPayload/properties/content/content")
                .and_then(Value::as_str)
        })
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect();

    Some(CommentPage {
        comments,
        next_token: reload_continuation_token(response),
    })
}

fn reload_continuation_token(response: &Value) -> Option<String> {
    array_at(response, "/onResponseReceivedEndpoints")
        .filter_map(|endpoint| endpoint.get("reloadContinuationItemsCommand"))
        .flat_map(|command| array_at(command, "/continuationItems"))
        .find_map(|item| {
            item.pointer("/continuationItemRenderer/continuationEndpoint/continuationCommand/token")
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
        })
}

/// Pagination state for one walk; never shared between extractions.
#[derive(Debug, Default)]
struct ContinuationState {
    token: Option<String>,
    seen: HashSet<String>,
    comments: Vec<String>,
    iteration: usize,
}

impl ContinuationState {
    fn new(seed: Option<String>) -> Self {
        Self {
            token: seed,
            ..Self::default()
        }
    }

    /// Record a page, returning how many comments were new.
    fn absorb(&mut self, page: CommentPage) -> usize {
        let before = self.comments.len();
        for comment in page.comments {
            if self.seen.insert(comment.clone()) {
                self.comments.push(comment);
            }
        }

        self.token = match page.next_token {
            Some(next) if self.token.as_deref() == Some(next.as_str()) => {
                debug!("continuation token repeated, stopping");
                None
            }
            next => next,
        };
        self.iteration += 1;
        self.comments.len() - before
    }
}

/// Walk the comment continuation chain.
///
/// Stops when there is no further token, after `max_pages` requests, on a
/// failed or malformed response, or on cancellation. Comments gathered up to
/// that point are always returned, deduplicated, in first-seen order.
pub async fn paginate_comments(
    transport: &dyn Transport,
    endpoint: &str,
    context: &SessionContext,
    seed: Option<String>,
    max_pages: usize,
    page_timeout: Duration,
    cancel: &CancellationToken,
) -> Vec<String> {
    let mut state = ContinuationState::new(seed);

    if state.token.is_none() {
        debug!("no comment continuation token, skipping comments");
        return state.comments;
    }

    while state.iteration < max_pages {
        let Some(token) = state.token.as_deref() else {
            break;
        };

        let body = json!({
            "context": context,
            "continuation": token,
        });

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(pages = state.iteration, "comment pagination cancelled");
                break;
            }
            response = transport.post_json(endpoint, &body, page_timeout) => response,
        };

        let page = match response {
            Ok(value) => match parse_comment_page(&value) {
                Some(page) => page,
                None => {
                    warn!(page = state.iteration + 1, "malformed comment page, stopping");
                    break;
                }
            },
            Err(e) => {
                warn!(page = state.iteration + 1, error = %e, "comment page request failed, stopping");
                break;
            }
        };

        let added = state.absorb(page);
        debug!(
            page = state.iteration,
            added,
            total = state.comments.len(),
            more = state.token.is_some(),
            "comment page processed"
        );
    }

    info!(
        pages = state.iteration,
        comments = state.comments.len(),
        "comment pagination finished"
    );
    state.comments
}
