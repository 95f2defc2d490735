//! A schema-to-GROQ compiler with response validation.
//!
//! This crate is the core of the groqlayer project and provides:
//!
//! - **Schema nodes** ([`schema`]) - Data-shape descriptions carrying projection metadata
//! - **Serialization** ([`serialize`]) - Recursive GROQ generation from schema nodes
//! - **Query composition** ([`query`]) - Filter groups, slices and typed result schemas
//! - **Response decoding** ([`decode`]) - Validation of responses against a schema's shape
//! - **Fetch abstraction** ([`fetch`]) - The injected `(query, params) -> JSON` capability
//! - **Query client** ([`client`]) - Serialize, fetch and validate in one call
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use groqlayer_core::schema::Node;
//!
//! let movies = Node::collection(Node::projection([
//!     ("title", Node::string()),
//!     ("director", Node::projection([("name", Node::string())])),
//! ]))
//! .filter(r#"_type == "movie""#);
//!
//! assert_eq!(movies.serialize(), r#"[_type == "movie"]{_key,...@{title,director{name}}}"#);
//! ```

#[allow(unused_extern_crates)]
extern crate self as groqlayer_core;

pub mod client;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod query;
pub mod schema;
pub mod serialize;
