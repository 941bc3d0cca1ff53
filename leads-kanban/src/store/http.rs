//! JSON-over-HTTP store backed by the job board's REST API
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Call                       | Request                          |
//! |----------------------------|----------------------------------|
//! | fetch leads                | `GET    leads`                   |
//! | update lead                | `PATCH  leads/{id}`              |
//! | delete lead                | `DELETE leads/{id}`              |
//! | fetch / replace columns    | `GET` / `PUT leads/columns`      |
//! | delete column              | `DELETE leads/columns/{id}`      |
//! | fetch / replace hidden     | `GET` / `PUT leads/columns/hidden` |
//!
//! Responses may be bare JSON or wrapped as `{"data": ...}`.

use super::{ColumnStore, LeadStore, StoreError, StoreResult};
use crate::types::{ColumnDef, CustomColumnId, Lead, LeadId, LeadPatch, LeadStatus};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Connection settings for [`HttpStore`]
#[derive(Debug, Clone)]
pub struct HttpStoreOptions {
    pub base_url: String,
    /// Bearer token identifying the actor
    pub token: Option<String>,
    pub timeout: Duration,
}

impl HttpStoreOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Leads and column store over HTTP
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(value) => value,
        }
    }
}

impl HttpStore {
    pub fn new(options: HttpStoreOptions) -> StoreResult<Self> {
        let base_url = Url::parse(&options.base_url).map_err(|e| {
            StoreError::validation(format!("invalid base url '{}': {e}", options.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::validation(format!(
                "base url cannot carry paths: {}",
                options.base_url
            )));
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| StoreError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: options.token,
        })
    }

    /// Base URL plus percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "store request");
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, subject: &str) -> StoreResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::network(e.to_string()))?;
        check_status(response, subject).await
    }

    async fn read<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        response
            .json::<Envelope<T>>()
            .await
            .map(Envelope::into_inner)
            .map_err(|e| StoreError::network(format!("invalid response body: {e}")))
    }

    async fn put_json<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> StoreResult<()> {
        let request = self.request(Method::PUT, segments).json(body);
        self.send(request, &segments.join("/")).await?;
        Ok(())
    }
}

/// Map a non-success status to the store error taxonomy
async fn check_status(response: Response, subject: &str) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();

    Err(match status {
        StatusCode::NOT_FOUND => StoreError::not_found(subject),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            StoreError::validation(error_message(&body).unwrap_or_else(|| status.to_string()))
        }
        _ => StoreError::network(format!("unexpected status {status}")),
    })
}

/// Pull a human readable message out of an error body
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            let text = body.trim();
            return (!text.is_empty()).then(|| text.to_string());
        }
    };
    value
        .get("message")
        .or_else(|| value.get("error").and_then(|e| e.get("message")))
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[async_trait]
impl LeadStore for HttpStore {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> StoreResult<Vec<Lead>> {
        let response = self
            .send(self.request(Method::GET, &["leads"]), "leads")
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self, patch), fields(lead = %id))]
    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> StoreResult<Lead> {
        let request = self
            .request(Method::PATCH, &["leads", id.as_str()])
            .json(patch);
        let response = self.send(request, id.as_str()).await?;
        Self::read(response).await
    }

    #[instrument(skip(self), fields(lead = %id))]
    async fn delete(&self, id: &LeadId) -> StoreResult<()> {
        self.send(
            self.request(Method::DELETE, &["leads", id.as_str()]),
            id.as_str(),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ColumnStore for HttpStore {
    #[instrument(skip(self))]
    async fn fetch_custom_columns(&self) -> StoreResult<Vec<ColumnDef>> {
        let response = self
            .send(self.request(Method::GET, &["leads", "columns"]), "columns")
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self, columns), fields(count = columns.len()))]
    async fn replace_custom_columns(&self, columns: &[ColumnDef]) -> StoreResult<()> {
        self.put_json(&["leads", "columns"], columns).await
    }

    #[instrument(skip(self), fields(column = %id))]
    async fn delete_custom_column(&self, id: &CustomColumnId) -> StoreResult<()> {
        self.send(
            self.request(Method::DELETE, &["leads", "columns", id.as_str()]),
            id.as_str(),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_hidden_statuses(&self) -> StoreResult<Vec<LeadStatus>> {
        let response = self
            .send(
                self.request(Method::GET, &["leads", "columns", "hidden"]),
                "hidden columns",
            )
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self))]
    async fn replace_hidden_statuses(&self, hidden: &[LeadStatus]) -> StoreResult<()> {
        self.put_json(&["leads", "columns", "hidden"], hidden).await
    }
}
