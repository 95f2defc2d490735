//! In-memory fetcher implementation.
//!
//! This module provides a scripted [`Fetcher`] that answers queries from canned responses held
//! behind async-safe read-write locks, and records every request it receives.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use mea::rwlock::RwLock;
use serde_json::Value;

use groqlayer_core::{
    error::{GroqError, GroqResult},
    fetch::{Fetcher, FetcherBuilder, Params},
};

/// A request observed by an [`InMemoryFetcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub query: String,
    pub params: Option<Params>,
}

#[derive(Debug, Clone)]
enum Canned {
    Value(Value),
    Failure(String),
}

impl Canned {
    fn into_result(self) -> GroqResult<Value> {
        match self {
            Canned::Value(value) => Ok(value),
            Canned::Failure(message) => Err(GroqError::Fetch(message)),
        }
    }
}

/// Thread-safe scripted fetcher.
///
/// Responses are picked in this order:
///
/// 1. the next queued one-shot response, if any
/// 2. the response registered for the exact query string
/// 3. the default response (`null` unless configured)
///
/// `InMemoryFetcher` is cloneable and clones share the same state, so a test can keep a handle
/// to inspect [`requests`](InMemoryFetcher::requests) after handing the fetcher to a client.
///
/// # Example
///
/// ```ignore
/// use groqlayer_memory::InMemoryFetcher;
/// use serde_json::json;
///
/// let fetcher = InMemoryFetcher::new();
/// fetcher.respond_to(r#"*[_type == "movie"][]"#, json!([])).await;
///
/// let client = QueryClient::new(fetcher.clone());
/// client.fetch(&filter_by_type("movie"), None).await?;
///
/// assert_eq!(fetcher.request_count().await, 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryFetcher {
    /// Responses keyed by exact query string
    responses: Arc<RwLock<HashMap<String, Canned>>>,
    /// One-shot responses, consumed front to back
    queue: Arc<RwLock<VecDeque<Canned>>>,
    default_response: Arc<RwLock<Value>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl InMemoryFetcher {
    /// Creates a fetcher answering `null` to every query.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            queue: Arc::new(RwLock::new(VecDeque::new())),
            default_response: Arc::new(RwLock::new(Value::Null)),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn builder() -> InMemoryFetcherBuilder {
        InMemoryFetcherBuilder::default()
    }

    /// Answers `query` with `response` until replaced.
    pub async fn respond_to(&self, query: impl Into<String>, response: Value) {
        self.responses
            .write()
            .await
            .insert(query.into(), Canned::Value(response));
    }

    /// Fails `query` with a fetch error until replaced.
    pub async fn fail_on(&self, query: impl Into<String>, message: impl Into<String>) {
        self.responses
            .write()
            .await
            .insert(query.into(), Canned::Failure(message.into()));
    }

    /// Queues a response for the next request, whatever its query.
    pub async fn push_response(&self, response: Value) {
        self.queue.write().await.push_back(Canned::Value(response));
    }

    /// Queues a fetch error for the next request, whatever its query.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.queue
            .write()
            .await
            .push_back(Canned::Failure(message.into()));
    }

    pub async fn set_default_response(&self, response: Value) {
        *self.default_response.write().await = response;
    }

    /// Returns every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Returns the most recent request, if any.
    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.read().await.last().cloned()
    }

    /// Forgets recorded requests and queued responses. Registered responses are kept.
    pub async fn reset(&self) {
        self.requests.write().await.clear();
        self.queue.write().await.clear();
    }
}

#[async_trait]
impl Fetcher for InMemoryFetcher {
    async fn fetch(&self, query: &str, params: Option<&Params>) -> GroqResult<Value> {
        self.requests.write().await.push(RecordedRequest {
            query: query.to_string(),
            params: params.cloned(),
        });

        if let Some(canned) = self.queue.write().await.pop_front() {
            return canned.into_result();
        }

        if let Some(canned) = self.responses.read().await.get(query) {
            return canned.clone().into_result();
        }

        Ok(self.default_response.read().await.clone())
    }
}

/// Builder for constructing [`InMemoryFetcher`] instances with responses already in place.
///
/// # Example
///
/// ```ignore
/// use groqlayer_memory::InMemoryFetcher;
/// use groqlayer::fetch::FetcherBuilder;
///
/// let fetcher = InMemoryFetcher::builder()
///     .respond_to(r#"*[_type == "movie"][]"#, json!([]))
///     .build()
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryFetcherBuilder {
    responses: HashMap<String, Canned>,
    queue: VecDeque<Canned>,
    default_response: Value,
}

impl InMemoryFetcherBuilder {
    pub fn respond_to(mut self, query: impl Into<String>, response: Value) -> Self {
        self.responses.insert(query.into(), Canned::Value(response));
        self
    }

    pub fn fail_on(mut self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert(query.into(), Canned::Failure(message.into()));
        self
    }

    pub fn push_response(mut self, response: Value) -> Self {
        self.queue.push_back(Canned::Value(response));
        self
    }

    pub fn default_response(mut self, response: Value) -> Self {
        self.default_response = response;
        self
    }
}

#[async_trait]
impl FetcherBuilder for InMemoryFetcherBuilder {
    type Fetcher = InMemoryFetcher;

    /// Builds the fetcher. This always succeeds.
    async fn build(self) -> GroqResult<Self::Fetcher> {
        Ok(InMemoryFetcher {
            responses: Arc::new(RwLock::new(self.responses)),
            queue: Arc::new(RwLock::new(self.queue)),
            default_response: Arc::new(RwLock::new(self.default_response)),
            requests: Arc::new(RwLock::new(Vec::new())),
        })
    }
}
