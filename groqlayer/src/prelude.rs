//! Convenient re-exports of commonly used types from groqlayer.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use groqlayer::prelude::*;
//! ```
//!
//! This provides access to:
//! - Schema nodes, options and typed projections
//! - Query composition and filter expressions
//! - The query client, fetch traits and decoders
//! - Error types

pub use groqlayer_core::{
    schema::{Node, Kind, Shape, Slice, Expansion, Condition, TypedProjection, ProjectionOptions, CollectionOptions, UnionOptions, OptionsPatch},
    serialize::{serialize, QueryCache, SchemaVisitor},
    query::{ArrayQuery, EntityQuery, Expr, Filter, FieldOp, Operand, QueryVisitor, all_documents, filter_by_type, filter_by_type_where},
    decode::{Decoder, ShapeDecoder, ValidationIssue},
    fetch::{Fetcher, FetcherBuilder, Param, Params, fetch_fn, params},
    client::{QueryClient, DynQueryClient, QueryClientBuilder, ClientOptions, GroqSource, ValidationMode},
    error::{GroqError, GroqResult},
};
