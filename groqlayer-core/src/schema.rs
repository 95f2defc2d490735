//! Schema nodes: data-shape descriptions carrying query metadata.
//!
//! A [`Node`] describes both what a GROQ query should project and what the store is expected to
//! return for it. The query side is selected by the node's [`Kind`]; the decode side is the data
//! shape underneath it.
//!
//! # Building schemas
//!
//! ```ignore
//! use groqlayer::schema::{Node, TypedProjection};
//!
//! let movie = Node::projection([
//!     ("title", Node::string()),
//!     ("director", Node::projection([("name", Node::string())])),
//! ]);
//!
//! assert_eq!(movie.serialize(), "{title,director{name}}");
//!
//! // Deriving never mutates the receiver.
//! let comedies = movie.filter(r#"genre == "comedy""#);
//! assert_eq!(movie.serialize(), "{title,director{name}}");
//! assert_eq!(comedies.serialize(), r#"[genre == "comedy"][0]{title,director{name}}"#);
//! ```
//!
//! # Node kinds
//!
//! - **Leaf** - plain data shape, projected as a bare key
//! - **Raw** - literal GROQ fragment, also used for aliases
//! - **Nullable** - decode-time only wrapper, serializes like its inner node
//! - **Projection** - `{a,b{c}}` object projection with optional filter, slice and expansion
//! - **Collection** - `[]{...}` array projection with a synthetic `_key` per structured element
//! - **ConditionalUnion** - `select()` over condition/branch pairs

use std::{fmt, ops::Range};

use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

/// Attribute holding the document discriminant.
pub const DISCRIMINANT_FIELD: &str = "_type";

/// Synthetic per-element attribute added to structured collection elements.
pub const KEY_FIELD: &str = "_key";

/// Discriminant reported by the typed-union fallback branch.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Discriminant used by [`Expansion::reference`].
pub const REFERENCE_TYPE: &str = "reference";

/// Ordered mapping of output attribute name to schema node.
pub type Properties = IndexMap<String, Node>;

/// Identity of a node.
///
/// Every constructor and every derived variant gets a fresh id, while a plain `clone()` keeps it,
/// since the clone has identical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    fn new() -> Self {
        NodeId(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plain data shape of a value returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Any value.
    Unknown,
    /// Exactly `null`.
    Null,
    Boolean,
    Number,
    Integer,
    String,
    /// Exactly the given JSON value.
    Literal(Value),
    /// Object with the given required attributes. Extra attributes are allowed.
    Object(Properties),
    /// Object with arbitrary keys, each value matching the node.
    Record(Box<Node>),
    /// Array with every item matching the node.
    Array(Box<Node>),
    /// Any one of the nodes.
    Union(Vec<Node>),
}

/// Index or half-open range applied to a filtered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    /// Single element, `[n]`.
    Index(usize),
    /// Elements `from..to`, `[from...to]`.
    Range(usize, usize),
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slice::Index(index) => write!(f, "[{index}]"),
            Slice::Range(from, to) => write!(f, "[{from}...{to}]"),
        }
    }
}

impl From<usize> for Slice {
    fn from(index: usize) -> Self {
        Slice::Index(index)
    }
}

impl From<(usize, usize)> for Slice {
    fn from((from, to): (usize, usize)) -> Self {
        Slice::Range(from, to)
    }
}

impl From<Range<usize>> for Slice {
    fn from(range: Range<usize>) -> Self {
        Slice::Range(range.start, range.end)
    }
}

/// How a projection follows a reference before projecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Always dereference: `{...@->{...}}`.
    Dereference,
    /// Dereference only when the current `_type` equals the given value, otherwise project the
    /// current node directly.
    Conditional(String),
}

impl Expansion {
    /// Conditional expansion on the conventional `"reference"` discriminant.
    pub fn reference() -> Self {
        Expansion::Conditional(REFERENCE_TYPE.to_string())
    }
}

impl From<&str> for Expansion {
    fn from(discriminant: &str) -> Self {
        Expansion::Conditional(discriminant.to_string())
    }
}

impl From<String> for Expansion {
    fn from(discriminant: String) -> Self {
        Expansion::Conditional(discriminant)
    }
}

/// Options of a [`Kind::Projection`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionOptions {
    /// Filter prefixed to the projection. A filter alone implies `[0]`.
    pub filter: Option<String>,
    /// Index (or range) taken after the filter.
    pub slice: Option<Slice>,
    /// Reference expansion wrapped around the projection body.
    pub expand: Option<Expansion>,
    /// Spread every source attribute before the named ones.
    pub greedy: bool,
}

impl ProjectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn slice(mut self, slice: impl Into<Slice>) -> Self {
        self.slice = Some(slice.into());
        self
    }

    pub fn expand(mut self, expand: impl Into<Expansion>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }
}

/// Options of a [`Kind::Collection`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionOptions {
    /// Filter prefixed to the collection. Unlike projections, no index is implied.
    pub filter: Option<String>,
    /// Slice taken after the filter.
    pub slice: Option<Slice>,
}

impl CollectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn slice(mut self, slice: impl Into<Slice>) -> Self {
        self.slice = Some(slice.into());
        self
    }
}

/// Options of a [`Kind::ConditionalUnion`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnionOptions {
    pub expand: Option<Expansion>,
}

impl UnionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(mut self, expand: impl Into<Expansion>) -> Self {
        self.expand = Some(expand.into());
        self
    }
}

/// Condition guarding a branch of a conditional union.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// GROQ boolean expression, e.g. `_type == "person"`.
    Expr(String),
    /// Untagged fallback branch, always emitted last.
    Default,
}

impl From<&str> for Condition {
    fn from(condition: &str) -> Self {
        match condition {
            "default" => Condition::Default,
            _ => Condition::Expr(condition.to_string()),
        }
    }
}

impl From<String> for Condition {
    fn from(condition: String) -> Self {
        match condition.as_str() {
            "default" => Condition::Default,
            _ => Condition::Expr(condition),
        }
    }
}

/// A condition and the node projected when it matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Condition,
    pub node: Node,
}

/// Dispatch tag of a node, holding everything the serializer needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Plain data shape. Serializes to nothing.
    Leaf(Shape),
    /// Literal fragment emitted verbatim, decoded as `schema`.
    Raw { fragment: String, schema: Box<Node> },
    /// Inner node that may also be null or absent.
    Nullable(Box<Node>),
    Projection {
        properties: Properties,
        options: ProjectionOptions,
    },
    Collection {
        element: Box<Node>,
        options: CollectionOptions,
    },
    ConditionalUnion {
        branches: Vec<Branch>,
        options: UnionOptions,
    },
}

/// Sparse override merged into a node's options by [`Node::with_options`].
///
/// Fields a node's kind does not carry are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsPatch {
    pub filter: Option<String>,
    pub slice: Option<Slice>,
    pub expand: Option<Expansion>,
    pub greedy: Option<bool>,
}

/// A schema node.
///
/// Nodes are immutable. Every derivation (`filter`, `slice`, `expand`, ...) returns a new node
/// with a fresh [`NodeId`] and leaves the receiver untouched, so a base node can be shared between
/// any number of independent queries.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: Kind,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Node {
    /// Creates a node of the given kind with a fresh identity.
    pub fn new(kind: Kind) -> Self {
        Node { id: NodeId::new(), kind }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn into_kind(self) -> Kind {
        self.kind
    }

    pub fn leaf(shape: Shape) -> Self {
        Node::new(Kind::Leaf(shape))
    }

    pub fn unknown() -> Self {
        Node::leaf(Shape::Unknown)
    }

    pub fn null() -> Self {
        Node::leaf(Shape::Null)
    }

    pub fn boolean() -> Self {
        Node::leaf(Shape::Boolean)
    }

    pub fn number() -> Self {
        Node::leaf(Shape::Number)
    }

    pub fn integer() -> Self {
        Node::leaf(Shape::Integer)
    }

    pub fn string() -> Self {
        Node::leaf(Shape::String)
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Node::leaf(Shape::Literal(value.into()))
    }

    /// Plain object shape. Unlike [`Node::projection`] it does not project its attributes.
    pub fn object<K: Into<String>>(properties: impl IntoIterator<Item = (K, Node)>) -> Self {
        Node::leaf(Shape::Object(collect_properties(properties)))
    }

    /// Plain array shape. Unlike [`Node::collection`] it does not project its items.
    pub fn array(item: Node) -> Self {
        Node::leaf(Shape::Array(Box::new(item)))
    }

    pub fn record(value: Node) -> Self {
        Node::leaf(Shape::Record(Box::new(value)))
    }

    pub fn union(members: impl IntoIterator<Item = Node>) -> Self {
        Node::leaf(Shape::Union(members.into_iter().collect()))
    }

    /// Projects the given attributes: `{key,key2,...}`.
    pub fn projection<K: Into<String>>(properties: impl IntoIterator<Item = (K, Node)>) -> Self {
        Node::projection_with(properties, ProjectionOptions::default())
    }

    pub fn projection_with<K: Into<String>>(
        properties: impl IntoIterator<Item = (K, Node)>,
        options: ProjectionOptions,
    ) -> Self {
        Node::new(Kind::Projection {
            properties: collect_properties(properties),
            options,
        })
    }

    /// Projects every element of an array: `[]{_key,...@{...}}`.
    pub fn collection(element: Node) -> Self {
        Node::collection_with(element, CollectionOptions::default())
    }

    pub fn collection_with(element: Node, options: CollectionOptions) -> Self {
        Node::new(Kind::Collection {
            element: Box::new(element),
            options,
        })
    }

    /// Selects a projection per condition: `{...select(cond => {...},...)}`.
    ///
    /// Conditions behave like map keys: repeating a condition replaces the earlier node in place.
    /// The `"default"` condition is emitted last wherever it appears.
    pub fn conditional_union<C: Into<Condition>>(
        branches: impl IntoIterator<Item = (C, Node)>,
    ) -> Self {
        Node::conditional_union_with(branches, UnionOptions::default())
    }

    pub fn conditional_union_with<C: Into<Condition>>(
        branches: impl IntoIterator<Item = (C, Node)>,
        options: UnionOptions,
    ) -> Self {
        let branches = branches
            .into_iter()
            .map(|(condition, node)| (condition.into(), node))
            .collect::<IndexMap<Condition, Node>>()
            .into_iter()
            .map(|(condition, node)| Branch { condition, node })
            .collect();

        Node::new(Kind::ConditionalUnion { branches, options })
    }

    /// Conditional union keyed on each projection's `_type`, with a fallback branch yielding
    /// `{"_rawType":_type,"_type":"unknown"}` for unrecognised discriminants.
    pub fn typed_union(projections: impl IntoIterator<Item = TypedProjection>) -> Self {
        Node::typed_union_with(projections, UnionOptions::default())
    }

    pub fn typed_union_with(
        projections: impl IntoIterator<Item = TypedProjection>,
        options: UnionOptions,
    ) -> Self {
        let branches = std::iter::once((Condition::Default, unknown_type_projection())).chain(
            projections.into_iter().map(|projection| {
                let condition = format!(
                    "{DISCRIMINANT_FIELD} == {}",
                    quote(projection.discriminant())
                );
                (Condition::Expr(condition), projection.into_node())
            }),
        );

        Node::conditional_union_with(branches, options)
    }

    /// Emits `fragment` verbatim and decodes as `schema`.
    pub fn raw(fragment: impl Into<String>, schema: Node) -> Self {
        Node::new(Kind::Raw {
            fragment: fragment.into(),
            schema: Box::new(schema),
        })
    }

    /// Projects another attribute under this key: `"key":target`.
    pub fn alias(target: impl Into<String>, schema: Node) -> Self {
        Node::raw(target, schema)
    }

    /// Projects the attribute as-is, whatever the schema would otherwise project.
    pub fn field(schema: Node) -> Self {
        Node::leaf(schema.to_shape())
    }

    /// Allows the value to also be null or absent. Does not change serialization.
    pub fn nullable(schema: Node) -> Self {
        Node::new(Kind::Nullable(Box::new(schema)))
    }

    /// Returns a copy with `patch` merged into the options. The receiver is left untouched.
    pub fn with_options(&self, patch: OptionsPatch) -> Node {
        let mut kind = self.kind.clone();

        match &mut kind {
            Kind::Projection { options, .. } => {
                if let Some(filter) = patch.filter {
                    options.filter = Some(filter);
                }
                if let Some(slice) = patch.slice {
                    options.slice = Some(slice);
                }
                if let Some(expand) = patch.expand {
                    options.expand = Some(expand);
                }
                if let Some(greedy) = patch.greedy {
                    options.greedy = greedy;
                }
            }
            Kind::Collection { options, .. } => {
                if let Some(filter) = patch.filter {
                    options.filter = Some(filter);
                }
                if let Some(slice) = patch.slice {
                    options.slice = Some(slice);
                }
            }
            Kind::ConditionalUnion { options, .. } => {
                if let Some(expand) = patch.expand {
                    options.expand = Some(expand);
                }
            }
            Kind::Leaf(_) | Kind::Raw { .. } | Kind::Nullable(_) => {}
        }

        Node::new(kind)
    }

    pub fn filter(&self, filter: impl Into<String>) -> Node {
        self.with_options(OptionsPatch {
            filter: Some(filter.into()),
            ..Default::default()
        })
    }

    pub fn slice(&self, slice: impl Into<Slice>) -> Node {
        self.with_options(OptionsPatch {
            slice: Some(slice.into()),
            ..Default::default()
        })
    }

    /// Wraps projections and conditional unions in a reference expansion. Other kinds are
    /// returned unchanged.
    pub fn expand(&self, expand: impl Into<Expansion>) -> Node {
        self.with_options(OptionsPatch {
            expand: Some(expand.into()),
            ..Default::default()
        })
    }

    /// Shorthand for `expand(Expansion::Dereference)`.
    pub fn dereference(&self) -> Node {
        self.expand(Expansion::Dereference)
    }

    pub fn greedy(&self) -> Node {
        self.with_options(OptionsPatch {
            greedy: Some(true),
            ..Default::default()
        })
    }

    /// Returns the GROQ fragment for this node.
    pub fn serialize(&self) -> String {
        crate::serialize::serialize(self)
    }

    /// True when the decoded value is object- or union-shaped.
    pub fn is_structured(&self) -> bool {
        match &self.kind {
            Kind::Projection { .. } | Kind::ConditionalUnion { .. } => true,
            Kind::Collection { .. } => false,
            Kind::Raw { schema, .. } => schema.is_structured(),
            Kind::Nullable(inner) => inner.is_structured(),
            Kind::Leaf(shape) => matches!(
                shape,
                Shape::Object(_) | Shape::Record(_) | Shape::Union(_)
            ),
        }
    }

    /// Returns the attributes of a projection or plain object.
    pub fn properties(&self) -> Option<&Properties> {
        match &self.kind {
            Kind::Projection { properties, .. } | Kind::Leaf(Shape::Object(properties)) => {
                Some(properties)
            }
            _ => None,
        }
    }

    /// Returns the literal string held by the `_type` attribute, if any.
    pub fn discriminant(&self) -> Option<&str> {
        self.properties()?
            .get(DISCRIMINANT_FIELD)
            .and_then(|node| match node.kind() {
                Kind::Leaf(Shape::Literal(Value::String(value))) => Some(value.as_str()),
                _ => None,
            })
    }

    /// Returns the plain data shape of this node, dropping all query metadata.
    pub fn to_shape(&self) -> Shape {
        match &self.kind {
            Kind::Leaf(shape) => shape.clone(),
            Kind::Raw { schema, .. } => schema.to_shape(),
            Kind::Nullable(inner) => Shape::Union(vec![(**inner).clone(), Node::null()]),
            Kind::Projection { properties, .. } => Shape::Object(properties.clone()),
            Kind::Collection { element, .. } => Shape::Array(element.clone()),
            Kind::ConditionalUnion { branches, .. } => Shape::Union(
                branches
                    .iter()
                    .map(|branch| branch.node.clone())
                    .collect(),
            ),
        }
    }
}

impl From<Shape> for Node {
    fn from(shape: Shape) -> Self {
        Node::leaf(shape)
    }
}

/// A projection whose `_type` attribute is a known literal.
///
/// The discriminant is always the first projected attribute, so typed projections serialize as
/// `{_type,...}` and can be combined with [`Node::typed_union`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypedProjection {
    discriminant: String,
    node: Node,
}

impl TypedProjection {
    /// Creates a typed projection. A `_type` entry in `properties` is replaced by the literal.
    pub fn new<K: Into<String>>(
        discriminant: impl Into<String>,
        properties: impl IntoIterator<Item = (K, Node)>,
    ) -> Self {
        TypedProjection::with_options(discriminant, properties, ProjectionOptions::default())
    }

    pub fn with_options<K: Into<String>>(
        discriminant: impl Into<String>,
        properties: impl IntoIterator<Item = (K, Node)>,
        options: ProjectionOptions,
    ) -> Self {
        let discriminant = discriminant.into();

        let mut typed = Properties::new();
        typed.insert(
            DISCRIMINANT_FIELD.to_string(),
            Node::literal(discriminant.as_str()),
        );

        for (key, node) in properties {
            let key = key.into();
            if key != DISCRIMINANT_FIELD {
                typed.insert(key, node);
            }
        }

        TypedProjection {
            discriminant,
            node: Node::projection_with(typed, options),
        }
    }

    pub fn discriminant(&self) -> &str {
        &self.discriminant
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn into_node(self) -> Node {
        self.node
    }

    pub fn expand(&self, expand: impl Into<Expansion>) -> Self {
        TypedProjection {
            discriminant: self.discriminant.clone(),
            node: self.node.expand(expand),
        }
    }

    pub fn serialize(&self) -> String {
        self.node.serialize()
    }
}

impl From<TypedProjection> for Node {
    fn from(projection: TypedProjection) -> Self {
        projection.node
    }
}

/// Quotes a string as a GROQ (JSON) string literal.
pub(crate) fn quote(value: &str) -> String {
    Value::from(value).to_string()
}

fn collect_properties<K: Into<String>>(properties: impl IntoIterator<Item = (K, Node)>) -> Properties {
    properties
        .into_iter()
        .map(|(key, node)| (key.into(), node))
        .collect()
}

fn unknown_type_projection() -> Node {
    Node::projection([
        ("_rawType", Node::raw(DISCRIMINANT_FIELD, Node::string())),
        (
            DISCRIMINANT_FIELD,
            Node::raw(quote(UNKNOWN_TYPE), Node::literal(UNKNOWN_TYPE)),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Node {
        Node::projection([
            ("_type", Node::literal("movie")),
            ("name", Node::string()),
            ("genre", Node::string()),
        ])
    }

    #[test]
    fn derived_nodes_get_a_new_identity() {
        let base = movie();
        let filtered = base.filter(r#"genre == "action""#);

        assert_ne!(base.id(), filtered.id());
        assert_eq!(base.clone().id(), base.id());
    }

    #[test]
    fn deriving_leaves_the_receiver_untouched() {
        let base = movie();
        let _ = base.filter(r#"genre == "action""#).slice(3).dereference();

        match base.kind() {
            Kind::Projection { options, .. } => assert_eq!(options, &ProjectionOptions::default()),
            other => panic!("expected projection, got {other:?}"),
        }
    }

    #[test]
    fn with_options_merges_patch_fields() {
        let node = Node::projection_with([("name", Node::string())], ProjectionOptions::new().slice(2))
            .with_options(OptionsPatch {
                filter: Some("active".to_string()),
                ..Default::default()
            });

        match node.kind() {
            Kind::Projection { options, .. } => {
                assert_eq!(options.filter.as_deref(), Some("active"));
                assert_eq!(options.slice, Some(Slice::Index(2)));
            }
            other => panic!("expected projection, got {other:?}"),
        }
    }

    #[test]
    fn expanding_a_leaf_keeps_its_content() {
        let leaf = Node::string();
        let expanded = leaf.dereference();

        assert_eq!(leaf, expanded);
        assert_ne!(leaf.id(), expanded.id());
    }

    #[test]
    fn repeated_conditions_replace_in_place() {
        let node = Node::conditional_union([
            ("a", Node::string()),
            ("b", Node::number()),
            ("a", Node::boolean()),
        ]);

        match node.kind() {
            Kind::ConditionalUnion { branches, .. } => {
                assert_eq!(branches.len(), 2);
                assert_eq!(branches[0].condition, Condition::Expr("a".to_string()));
                assert_eq!(branches[0].node, Node::boolean());
            }
            other => panic!("expected conditional union, got {other:?}"),
        }
    }

    #[test]
    fn default_string_maps_to_default_condition() {
        assert_eq!(Condition::from("default"), Condition::Default);
        assert_eq!(
            Condition::from(String::from("_type == \"a\"")),
            Condition::Expr("_type == \"a\"".to_string())
        );
    }

    #[test]
    fn typed_projection_puts_discriminant_first() {
        let person = TypedProjection::new(
            "person",
            [("name", Node::string()), ("_type", Node::string())],
        );

        let keys = person
            .node()
            .properties()
            .map(|properties| properties.keys().cloned().collect::<Vec<_>>());

        assert_eq!(keys, Some(vec!["_type".to_string(), "name".to_string()]));
        assert_eq!(person.node().discriminant(), Some("person"));
    }

    #[test]
    fn structured_elements() {
        assert!(movie().is_structured());
        assert!(Node::nullable(movie()).is_structured());
        assert!(Node::object([("a", Node::string())]).is_structured());
        assert!(!Node::string().is_structured());
        assert!(!Node::nullable(Node::string()).is_structured());
        assert!(!Node::collection(movie()).is_structured());
    }

    #[test]
    fn field_keeps_the_data_shape() {
        let field = Node::field(movie());

        assert!(matches!(field.kind(), Kind::Leaf(Shape::Object(_))));
        assert_eq!(field.properties().map(|p| p.len()), Some(3));
    }

    #[test]
    fn slices_render_as_brackets() {
        assert_eq!(Slice::from(3).to_string(), "[3]");
        assert_eq!(Slice::from((0, 3)).to_string(), "[0...3]");
        assert_eq!(Slice::from(2..5).to_string(), "[2...5]");
    }
}
