// Typed client for the events HTTP API, used by the CLI and by anything that
// talks to a remote collection instead of local storage.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use backend_application::dtos::{DropInQuery, RelatedQuery};
use backend_domain::services::query;
use backend_domain::{Event, EventPatch, NewEvent};

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid api url '{0}'")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status {
        status: StatusCode,
        kind: Option<String>,
        message: String,
    },
}

impl ApiClientError {
    /// Machine-readable error kind reported by the server, e.g. `capacity`.
    pub fn kind(&self) -> Option<&str> {
        match self {
            ApiClientError::Status { kind, .. } => kind.as_deref(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    kind: Option<String>,
}

#[derive(Clone)]
pub struct EventApiClient {
    http: Client,
    base: Url,
}

impl EventApiClient {
    /// `base_url` is the API root, e.g. `http://192.168.1.66:3000/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| ApiClientError::InvalidUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiClientError::InvalidUrl(base_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    /// Verifies the API answers before the client is used.
    pub async fn check(&self) -> Result<(), ApiClientError> {
        self.list().await.map(|_| ())
    }

    pub async fn list(&self) -> Result<Vec<Event>, ApiClientError> {
        self.send(self.http.get(self.url(&["events"])?)).await
    }

    pub async fn featured(&self) -> Result<Vec<Event>, ApiClientError> {
        self.send(self.http.get(self.url(&["events", "featured", "upcoming"])?))
            .await
    }

    /// No dedicated endpoint: sorts the full listing newest first.
    pub async fn recent(&self) -> Result<Vec<Event>, ApiClientError> {
        let events = self.list().await?;
        Ok(query::recent(&events))
    }

    pub async fn get(&self, id: &str) -> Result<Option<Event>, ApiClientError> {
        match self.send(self.http.get(self.url(&["events", id])?)).await {
            Ok(event) => Ok(Some(event)),
            Err(ApiClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn related(&self, params: &RelatedQuery) -> Result<Vec<Event>, ApiClientError> {
        let request = self.http.get(self.url(&["events", "related"])?).query(params);
        self.send(request).await
    }

    pub async fn search(&self, text: &str) -> Result<Vec<Event>, ApiClientError> {
        self.send(self.http.get(self.url(&["events", "search", text])?))
            .await
    }

    pub async fn drop_in(&self, params: &DropInQuery) -> Result<Vec<Event>, ApiClientError> {
        let request = self.http.get(self.url(&["events", "drop-in"])?).query(params);
        self.send(request).await
    }

    pub async fn create(&self, payload: &NewEvent) -> Result<Event, ApiClientError> {
        let request = self.http.post(self.url(&["events"])?).json(payload);
        self.send(request).await
    }

    pub async fn update(&self, id: &str, patch: &EventPatch) -> Result<Event, ApiClientError> {
        let request = self.http.patch(self.url(&["events", id])?).json(patch);
        self.send(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<Event, ApiClientError> {
        self.send(self.http.delete(self.url(&["events", id])?)).await
    }

    pub async fn join(&self, id: &str) -> Result<Event, ApiClientError> {
        self.send(self.http.post(self.url(&["events", id, "join"])?))
            .await
    }

    pub async fn leave(&self, id: &str) -> Result<Event, ApiClientError> {
        self.send(self.http.post(self.url(&["events", id, "leave"])?))
            .await
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "api response");
        if status.is_success() {
            return response.json::<T>().await.map_err(ApiClientError::Decode);
        }
        let text = response.text().await.unwrap_or_default();
        let (kind, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.kind, body.error),
            Err(_) => (None, text),
        };
        Err(ApiClientError::Status {
            status,
            kind,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_escaped_urls_under_the_api_root() {
        let client = EventApiClient::new("http://127.0.0.1:3000/api/", Duration::from_secs(1))
            .expect("client");
        let url = client.url(&["events", "search", "drop in/burnaby"]).expect("url");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:3000/api/events/search/drop%20in%2Fburnaby"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            EventApiClient::new("not a url", Duration::from_secs(1)),
            Err(ApiClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            EventApiClient::new("mailto:someone@example.com", Duration::from_secs(1)),
            Err(ApiClientError::InvalidUrl(_))
        ));
    }
}
