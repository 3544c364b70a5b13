use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{json::scalar_text, profile::ClientProfile};

/// The `context` object sent with every internal API request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub client: ClientContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_context: Option<Value>,
}

/// Client identity. Fields with no source are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_interface_theme: Option<String>,
}

/// Assemble the request context from the page's client config and player
/// response plus the emulated client's fixed identity.
pub fn build_context(
    client_config: Option<&Value>,
    player_response: Option<&Value>,
    original_url: &str,
    profile: ClientProfile,
) -> SessionContext {
    let identity = profile.config();
    let config_field = |key: &str| client_config.and_then(|c| c.get(key)).and_then(scalar_text);

    let client = ClientContext {
        hl: config_field("HL"),
        gl: config_field("GL"),
        visitor_data: config_field("VISITOR_DATA"),
        user_agent: non_empty(identity.user_agent),
        client_name: config_field("INNERTUBE_CONTEXT_CLIENT_NAME"),
        client_version: config_field("INNERTUBE_CONTEXT_CLIENT_VERSION"),
        os_name: non_empty(identity.os_name),
        os_version: non_empty(identity.os_version),
        original_url: non_empty(original_url),
        platform: non_empty(identity.platform),
        utc_offset_minutes: Some(identity.utc_offset_minutes),
        user_interface_theme: non_empty(identity.user_interface_theme),
    };

    let response_context = player_response
        .and_then(|p| p.get("responseContext"))
        .filter(|v| !v.is_null())
        .cloned();

    SessionContext {
        client,
        response_context,
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
