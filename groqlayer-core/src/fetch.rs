//! Fetch capability abstraction.
//!
//! The client façade never talks to a store directly. It is handed a [`Fetcher`] that takes a
//! GROQ string plus optional parameters and returns the raw JSON response, leaving transport,
//! authentication and retries to the caller.
//!
//! # Traits
//!
//! - [`Fetcher`]: async `(query, params) -> JSON` capability
//! - [`FetcherBuilder`]: factory trait for creating fetcher instances
//!
//! # Examples
//!
//! ```ignore
//! use groqlayer::fetch::{fetch_fn, params};
//! use serde_json::json;
//!
//! let fetcher = fetch_fn(|query, params| async move {
//!     my_http_client.query(&query, params).await.map_err(|e| GroqError::Fetch(e.to_string()))
//! });
//!
//! let movie = fetcher.fetch(r#"*[slug.current == $slug][0]"#, Some(&params([("slug", "alien")]))).await?;
//! ```

use std::{fmt, future::Future, sync::Arc};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::GroqResult;

/// Named query parameters, referenced as `$name` inside a query.
pub type Params = IndexMap<String, Param>;

/// A query parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    String(String),
    Number(Number),
    Null,
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::String(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::String(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Number(value.into())
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Number(value.into())
    }
}

impl From<u64> for Param {
    fn from(value: u64) -> Self {
        Param::Number(value.into())
    }
}

/// Non-finite numbers have no JSON form and become `Null`.
impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Param::Null, Param::Number)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

impl From<Param> for Value {
    fn from(param: Param) -> Self {
        match param {
            Param::String(value) => Value::String(value),
            Param::Number(value) => Value::Number(value),
            Param::Null => Value::Null,
        }
    }
}

/// Collects `(name, value)` pairs into [`Params`].
pub fn params<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Params
where
    K: Into<String>,
    V: Into<Param>,
{
    entries
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// Asynchronous capability that executes a GROQ query.
///
/// Implementations must be thread-safe so a single client can be shared across tasks.
///
/// # Error Handling
///
/// Transport failures should be reported as
/// [`GroqError::Fetch`](crate::error::GroqError::Fetch). The client propagates them unchanged.
#[async_trait]
pub trait Fetcher: Send + Sync + fmt::Debug {
    /// Executes `query` with the given parameters and returns the raw JSON response.
    async fn fetch(&self, query: &str, params: Option<&Params>) -> GroqResult<Value>;
}

#[async_trait]
impl<F> Fetcher for &F
where
    F: Fetcher + ?Sized,
{
    async fn fetch(&self, query: &str, params: Option<&Params>) -> GroqResult<Value> {
        (**self).fetch(query, params).await
    }
}

#[async_trait]
impl<F> Fetcher for Box<F>
where
    F: Fetcher + ?Sized,
{
    async fn fetch(&self, query: &str, params: Option<&Params>) -> GroqResult<Value> {
        (**self).fetch(query, params).await
    }
}

#[async_trait]
impl<F> Fetcher for Arc<F>
where
    F: Fetcher + ?Sized,
{
    async fn fetch(&self, query: &str, params: Option<&Params>) -> GroqResult<Value> {
        (**self).fetch(query, params).await
    }
}

/// Factory trait for creating fetchers.
#[async_trait]
pub trait FetcherBuilder {
    type Fetcher: Fetcher;

    async fn build(self) -> GroqResult<Self::Fetcher>;
}

/// A [`Fetcher`] backed by an async closure.
#[derive(Clone)]
pub struct FnFetcher<F> {
    f: F,
}

impl<F> fmt::Debug for FnFetcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> Fetcher for FnFetcher<F>
where
    F: Fn(String, Option<Params>) -> Fut + Send + Sync,
    Fut: Future<Output = GroqResult<Value>> + Send,
{
    async fn fetch(&self, query: &str, params: Option<&Params>) -> GroqResult<Value> {
        (self.f)(query.to_string(), params.cloned()).await
    }
}

/// Wraps an async closure `(query, params) -> GroqResult<Value>` as a [`Fetcher`].
pub fn fetch_fn<F, Fut>(f: F) -> FnFetcher<F>
where
    F: Fn(String, Option<Params>) -> Fut + Send + Sync,
    Fut: Future<Output = GroqResult<Value>> + Send,
{
    FnFetcher { f }
}
