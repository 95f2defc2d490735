//! In-memory fetcher for groqlayer.
//!
//! This crate provides a thread-safe, scripted implementation of the `Fetcher` trait. It answers
//! GROQ queries from canned responses and records every request, which makes it the natural
//! stand-in for a real store in tests and local development.
//!
//! # Features
//!
//! - **Thread-safe access** - Shared state behind async-aware RwLocks, clones share it
//! - **Per-query responses** - Answers keyed by the exact GROQ string
//! - **One-shot queue** - Scripted responses and failures consumed in order
//! - **Request log** - Every query and its parameters, for assertions
//!
//! # Quick Start
//!
//! ```ignore
//! use groqlayer::{prelude::*, memory::InMemoryFetcher};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = InMemoryFetcher::builder()
//!         .respond_to(r#"*[_type == "movie"][]{title}"#, json!([{"title": "Heat"}]))
//!         .build()
//!         .await?;
//!
//!     let client = QueryClient::new(fetcher);
//!     let movies = filter_by_type("movie").grab(Node::projection([("title", Node::string())]));
//!
//!     let response = client.fetch(&movies, None).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as groqlayer_memory;

pub mod fetcher;

pub use fetcher::{InMemoryFetcher, InMemoryFetcherBuilder, RecordedRequest};
