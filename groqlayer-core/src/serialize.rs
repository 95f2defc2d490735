//! Recursive GROQ serialization of schema nodes.
//!
//! [`SchemaVisitor`] dispatches on a node's [`Kind`]; [`GroqSerializer`] is the visitor that
//! produces GROQ text. Serialization is a pure function of node content: leaves contribute nothing,
//! so a bare projected key is emitted by the parent.
//!
//! Because nodes are immutable, a serialization can be cached per [`NodeId`] in a [`QueryCache`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{
    Branch, CollectionOptions, Condition, Expansion, Kind, Node, NodeId, ProjectionOptions,
    Properties, Shape, Slice, UnionOptions, quote,
};

static TRAILING_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]$").expect("trailing index pattern is valid"));

/// Visitor over schema nodes, dispatched on [`Kind`].
pub trait SchemaVisitor {
    type Output;

    fn visit_leaf(&mut self, shape: &Shape) -> Self::Output;
    fn visit_raw(&mut self, fragment: &str, schema: &Node) -> Self::Output;
    fn visit_nullable(&mut self, inner: &Node) -> Self::Output;
    fn visit_collection(&mut self, element: &Node, options: &CollectionOptions) -> Self::Output;
    fn visit_projection(
        &mut self,
        properties: &Properties,
        options: &ProjectionOptions,
    ) -> Self::Output;
    fn visit_conditional_union(
        &mut self,
        branches: &[Branch],
        options: &UnionOptions,
    ) -> Self::Output;

    fn visit_node(&mut self, node: &Node) -> Self::Output {
        walk_node(self, node)
    }
}

/// Calls the `visit_*` method matching the node's kind.
///
/// Visitors overriding [`SchemaVisitor::visit_node`] use this to fall back to the default dispatch.
pub fn walk_node<V: SchemaVisitor + ?Sized>(visitor: &mut V, node: &Node) -> V::Output {
    match node.kind() {
        Kind::Raw { fragment, schema } => visitor.visit_raw(fragment, schema),
        Kind::Nullable(inner) => visitor.visit_nullable(inner),
        Kind::Collection { element, options } => visitor.visit_collection(element, options),
        Kind::Projection {
            properties,
            options,
        } => visitor.visit_projection(properties, options),
        Kind::ConditionalUnion { branches, options } => {
            visitor.visit_conditional_union(branches, options)
        }
        Kind::Leaf(shape) => visitor.visit_leaf(shape),
    }
}

/// Serialized GROQ fragments keyed by node identity.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<NodeId, String>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &NodeId) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn insert(&mut self, id: NodeId, groq: impl Into<String>) {
        self.entries.insert(id, groq.into());
    }

    pub fn invalidate(&mut self, id: &NodeId) -> Option<String> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serializes `node`, reusing and filling this cache for the node and its descendants.
    pub fn serialize(&mut self, node: &Node) -> String {
        GroqSerializer::with_cache(self).serialize(node)
    }
}

/// Produces the GROQ fragment for a node tree.
#[derive(Debug, Default)]
pub struct GroqSerializer<'a> {
    cache: Option<&'a mut QueryCache>,
}

impl GroqSerializer<'static> {
    pub fn new() -> Self {
        GroqSerializer { cache: None }
    }
}

impl<'a> GroqSerializer<'a> {
    pub fn with_cache(cache: &'a mut QueryCache) -> Self {
        GroqSerializer { cache: Some(cache) }
    }

    pub fn serialize(&mut self, node: &Node) -> String {
        self.visit_node(node)
    }

    fn project_field(&mut self, key: &str, child: &Node) -> String {
        let inner = self.visit_node(child);

        if inner.is_empty() {
            key.to_string()
        } else if inner.starts_with('{') || inner.starts_with('[') {
            format!("{key}{inner}")
        } else {
            format!("\"{key}\":{inner}")
        }
    }
}

impl SchemaVisitor for GroqSerializer<'_> {
    type Output = String;

    fn visit_node(&mut self, node: &Node) -> String {
        if let Some(groq) = self.cache.as_deref().and_then(|cache| cache.get(node.id())) {
            return groq.to_string();
        }

        let groq = walk_node(self, node);

        if let Some(cache) = self.cache.as_deref_mut() {
            cache.insert(*node.id(), groq.clone());
        }

        groq
    }

    fn visit_leaf(&mut self, _shape: &Shape) -> String {
        String::new()
    }

    fn visit_raw(&mut self, fragment: &str, _schema: &Node) -> String {
        fragment.to_string()
    }

    fn visit_nullable(&mut self, inner: &Node) -> String {
        self.visit_node(inner)
    }

    fn visit_collection(&mut self, element: &Node, options: &CollectionOptions) -> String {
        let filter = options.filter.as_deref().and_then(trim_filter);
        let mut groq = String::new();

        if let Some(filter) = filter {
            groq.push_str(&bracket_filter(filter));
        }
        if let Some(slice) = &options.slice {
            groq.push_str(&slice.to_string());
        }
        if filter.is_none() && options.slice.is_none() {
            groq.push_str("[]");
        }

        let inner = self.visit_node(element);

        if !inner.is_empty() && element.is_structured() {
            groq.push_str(&format!("{{_key,...@{inner}}}"));
        } else {
            groq.push_str(&inner);
        }

        groq
    }

    fn visit_projection(&mut self, properties: &Properties, options: &ProjectionOptions) -> String {
        let filter = options.filter.as_deref().and_then(trim_filter);
        let mut groq = String::new();

        if let Some(filter) = filter {
            groq.push_str(&bracket_filter(filter));
        }

        let already_sliced = filter.is_some_and(|filter| TRAILING_INDEX.is_match(filter));
        if !already_sliced && (filter.is_some() || options.slice.is_some()) {
            groq.push_str(&options.slice.unwrap_or(Slice::Index(0)).to_string());
        }

        let mut fields = Vec::with_capacity(properties.len() + 1);
        if options.greedy {
            fields.push("...".to_string());
        }
        for (key, child) in properties {
            fields.push(self.project_field(key, child));
        }

        let body = format!("{{{}}}", fields.join(","));
        groq.push_str(&wrap_expansion(body, options.expand.as_ref()));
        groq
    }

    fn visit_conditional_union(&mut self, branches: &[Branch], options: &UnionOptions) -> String {
        let mut selects = Vec::with_capacity(branches.len());
        let mut defaults = Vec::new();

        for branch in branches {
            let body = self.visit_node(&branch.node);
            let body = if body.is_empty() { "...".to_string() } else { body };

            match &branch.condition {
                Condition::Expr(condition) => selects.push(format!("{condition} => {body}")),
                Condition::Default => defaults.push(body),
            }
        }

        selects.extend(defaults);

        let body = format!("{{...select({})}}", selects.join(","));
        wrap_expansion(body, options.expand.as_ref())
    }
}

/// Serializes a node without caching.
pub fn serialize(node: &Node) -> String {
    GroqSerializer::new().serialize(node)
}

/// Strips a single leading `*`. Empty filters count as absent.
fn trim_filter(filter: &str) -> Option<&str> {
    let filter = filter.strip_prefix('*').unwrap_or(filter);
    (!filter.is_empty()).then_some(filter)
}

/// Filters already holding a bracket are used verbatim.
fn bracket_filter(filter: &str) -> String {
    if filter.contains('[') {
        filter.to_string()
    } else {
        format!("[{filter}]")
    }
}

fn wrap_expansion(body: String, expand: Option<&Expansion>) -> String {
    match expand {
        None => body,
        Some(Expansion::Dereference) => format!("{{...@->{body}}}"),
        Some(Expansion::Conditional(discriminant)) => {
            let discriminant = quote(discriminant);
            format!(
                "{{_type == {discriminant} => @->{body},_type != {discriminant} => @{body}}}"
            )
        }
    }
}
