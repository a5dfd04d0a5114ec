use crate::internal::models::{DraftForm, StoryRecord};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Any failure of a request/response exchange with the stories backend.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// HTTP client for the `/stories` collection.
///
/// Every call is a single attempt: no retries, no timeouts and no caching.
#[derive(Clone, Debug)]
pub struct StoriesClient {
    client: Client,
    base_url: String,
}

impl StoriesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stories_url(&self) -> String {
        format!("{}/stories", self.base_url)
    }

    /// Body of a 2xx reply; anything else is a `Status` error.
    async fn read_body(url: &str, resp: reqwest::Response) -> Result<Vec<u8>, TransportError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| TransportError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    async fn read_json<T>(url: &str, resp: reqwest::Response) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        let bytes = Self::read_body(url, resp).await?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// `GET /stories`. Records come back in the order the server sent them.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<StoryRecord>, TransportError> {
        let url = self.stories_url();
        tracing::debug!(%url, "fetching stories");

        let result = match self.client.get(&url).send().await {
            Ok(resp) => Self::read_json::<Vec<StoryRecord>>(&url, resp).await,
            Err(e) => Err(TransportError::Network {
                url: url.clone(),
                reason: e.to_string(),
            }),
        };

        match &result {
            Ok(stories) => tracing::debug!(count = stories.len(), "stories fetched"),
            Err(e) => tracing::warn!(error = %e, "listing stories failed"),
        }
        result
    }

    /// `POST /stories` with the four draft fields.
    ///
    /// Any 2xx reply counts as success. When the body is not a story record
    /// (the stock backend answers with a confirmation message, others send
    /// nothing) the returned record mirrors the draft and leaves `id` and
    /// `timestamp` unset.
    #[tracing::instrument(skip(self, draft))]
    pub async fn create(&self, draft: &DraftForm) -> Result<StoryRecord, TransportError> {
        let url = self.stories_url();
        tracing::debug!(%url, title = %draft.title, "submitting story");

        let result = async {
            let resp = self
                .client
                .post(&url)
                .json(&draft.to_body())
                .send()
                .await
                .map_err(|e| TransportError::Network {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;
            let body = Self::read_body(&url, resp).await?;
            let story = serde_json::from_slice::<StoryRecord>(&body).unwrap_or_else(|_| StoryRecord {
                id: None,
                title: draft.title.clone(),
                content: draft.content.clone(),
                author: draft.author.clone(),
                location: Some(draft.location.clone()),
                timestamp: None,
            });
            Ok::<_, TransportError>(story)
        }
        .await;

        match &result {
            Ok(story) => tracing::info!(id = ?story.id, "story created"),
            Err(e) => tracing::warn!(error = %e, "creating story failed"),
        }
        result
    }
}

impl Default for StoriesClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
