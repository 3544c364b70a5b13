use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::debug;

use crate::error::{ExtractError, Result};

/// The two kinds of request the extractor makes.
///
/// Every call carries its own timeout; implementations must not wait longer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the body as text.
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String>;

    /// POST `body` as JSON to `url` and parse the response as JSON.
    async fn post_json(&self, url: &str, body: &Value, timeout: Duration) -> Result<Value>;
}

/// [`Transport`] over a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    user_agent: String,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self::with_client(client, user_agent))
    }

    pub fn with_client(client: Client, user_agent: &str) -> Self {
        Self {
            client,
            user_agent: user_agent.to_string(),
        }
    }

    fn classify(url: &str, err: reqwest::Error) -> ExtractError {
        if err.is_timeout() {
            ExtractError::Timeout {
                url: url.to_string(),
            }
        } else {
            ExtractError::HttpError(err)
        }
    }

    fn check_status(url: &str, response: &reqwest::Response) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String> {
        debug!(url, ?timeout, "GET");
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        Self::check_status(url, &response)?;
        response.text().await.map_err(|e| Self::classify(url, e))
    }

    async fn post_json(&self, url: &str, body: &Value, timeout: Duration) -> Result<Value> {
        debug!(url, ?timeout, "POST");
        let response = self
            .client
            .post(url)
            .header(header::USER_AGENT, &self.user_agent)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        Self::check_status(url, &response)?;
        let text = response.text().await.map_err(|e| Self::classify(url, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}
