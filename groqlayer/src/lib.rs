//! Main groqlayer crate: typed GROQ query building for Sanity-style content stores.
//!
//! This crate is the primary entry point for users of the groqlayer framework.
//! It re-exports the core types and functionality from the sub-crates and provides
//! an in-memory fetcher for tests.
//!
//! # Features
//!
//! - **Schema-driven projections** - Describe the data you want once, get both the GROQ and the
//!   response validation from it
//! - **Composable queries** - Immutable filter, slice and projection builders
//! - **Pluggable transport** - Bring any async `(query, params) -> JSON` function
//! - **Validation modes** - Fail, warn or stay silent on unexpected responses
//!
//! # Quick Start
//!
//! ```ignore
//! use groqlayer::{prelude::*, memory::InMemoryFetcher};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Movie {
//!     title: String,
//!     director: Option<Director>,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct Director {
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let movie = Node::projection([
//!         ("title", Node::string()),
//!         ("director", Node::nullable(Node::projection([("name", Node::string())]).dereference())),
//!     ]);
//!
//!     let query = filter_by_type("movie").grab(movie);
//!     // *[_type == "movie"][]{title,director{...@->{name}}}
//!     println!("{}", query.serialize());
//!
//!     let client = QueryClient::new(InMemoryFetcher::new());
//!     let movies: Option<Vec<Movie>> = client.fetch_as(&query, None).await.unwrap();
//! }
//! ```
//!
//! # Unions
//!
//! Documents of several types are projected with typed unions. Unrecognised types fall back to
//! `{"_rawType": <type>, "_type": "unknown"}` instead of failing validation.
//!
//! ```ignore
//! use groqlayer::prelude::*;
//!
//! let person = TypedProjection::new("person", [("name", Node::string())]);
//! let company = TypedProjection::new("company", [("title", Node::string())]);
//!
//! let query = all_documents()
//!     .filter(Filter::in_("_type", serde_json::json!(["person", "company"])))
//!     .grab(Node::typed_union([person, company]));
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Scripted in-memory fetcher for development and testing

pub mod prelude;

pub use groqlayer_core::{client, decode, error, fetch, query, schema, serialize};

// Re-export JSON types for convenience
pub use serde_json;

/// In-memory fetcher implementations.
pub mod memory {
    pub use groqlayer_memory::{InMemoryFetcher, InMemoryFetcherBuilder, RecordedRequest};
}
