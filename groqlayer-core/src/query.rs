//! Top-level GROQ query composition.
//!
//! A query is a schema to project, an ordered list of filter conditions and an optional slice.
//! [`ArrayQuery`] yields an array of results; [`EntityQuery`] yields a single result (or null).
//!
//! # Query Building
//!
//! ```ignore
//! use groqlayer::query::{Filter, filter_by_type};
//! use groqlayer::schema::Node;
//!
//! let movies = filter_by_type("movie")
//!     .grab(Node::projection([("title", Node::string()), ("description", Node::string())]));
//!
//! assert_eq!(movies.serialize(), r#"*[_type == "movie"][]{title,description}"#);
//!
//! let first_comedy = movies.filter(Filter::eq("genre", "comedy")).first();
//! assert_eq!(
//!     first_comedy.serialize(),
//!     r#"*[_type == "movie"][genre == "comedy"][0]{title,description}"#
//! );
//! ```
//!
//! # Filter Expression API
//!
//! The [`Filter`] struct provides static methods for building filter expressions:
//!
//! - Comparison: `eq`, `ne`, `gt`, `gte`, `lt`, `lte`
//! - String: `matches`
//! - Membership: `in_`, `contains`
//! - Existence: `defined`, `not_defined`
//! - Logical: `and`, `or`
//! - Escape hatch: `raw`
//!
//! Values can be inline JSON literals or named `$params` bound at fetch time.

use serde_json::Value;

use crate::schema::{DISCRIMINANT_FIELD, Node, Slice};

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    /// `field == value`
    Eq,
    /// `field != value`
    Ne,
    /// `field > value`
    Gt,
    /// `field >= value`
    Gte,
    /// `field < value`
    Lt,
    /// `field <= value`
    Lte,
    /// `field match value`, full-text pattern match.
    Match,
    /// `field in value`, value is an array or range.
    In,
    /// `value in field`, field is an array.
    Contains,
}

impl FieldOp {
    fn symbol(&self) -> &'static str {
        match self {
            FieldOp::Eq => "==",
            FieldOp::Ne => "!=",
            FieldOp::Gt => ">",
            FieldOp::Gte => ">=",
            FieldOp::Lt => "<",
            FieldOp::Lte => "<=",
            FieldOp::Match => "match",
            FieldOp::In | FieldOp::Contains => "in",
        }
    }
}

/// Right-hand side of a field comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Inline JSON literal.
    Value(Value),
    /// Named parameter, rendered as `$name`.
    Param(String),
}

impl Operand {
    pub fn param(name: impl Into<String>) -> Self {
        Operand::Param(name.into())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<u64> for Operand {
    fn from(value: u64) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Value(Value::from(value))
    }
}

/// A filter expression over documents.
///
/// # Example
///
/// ```ignore
/// use groqlayer::query::Filter;
///
/// let expr = Filter::eq("_type", "movie").and(Filter::gt("year", 1990));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Logical OR of multiple expressions (any must match).
    Or(Vec<Expr>),
    /// Logical NOT of an expression.
    Not(Box<Expr>),
    /// `defined(field)` or its negation.
    Exists(String, bool),
    /// Field comparison expression.
    Field {
        field: String,
        op: FieldOp,
        value: Operand,
    },
    /// GROQ condition emitted verbatim.
    Raw(String),
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: String, op: FieldOp, value: Operand) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: impl Into<Expr>) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other.into());
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other.into()]),
        }
    }

    /// Combines this expression with another using logical OR.
    pub fn or(self, other: impl Into<Expr>) -> Self {
        match self {
            Expr::Or(mut list) => {
                list.push(other.into());
                Expr::Or(list)
            }
            _ => Expr::Or(vec![self, other.into()]),
        }
    }

    /// Negates this expression (logical NOT).
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Renders the expression as a GROQ condition.
    pub fn to_groq(&self) -> String {
        GroqFilterTranslator.visit_expr(self)
    }
}

impl From<&str> for Expr {
    fn from(condition: &str) -> Self {
        Expr::Raw(condition.to_string())
    }
}

impl From<String> for Expr {
    fn from(condition: String) -> Self {
        Expr::Raw(condition)
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::Eq, value.into())
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::Ne, value.into())
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::Gt, value.into())
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::Gte, value.into())
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::Lt, value.into())
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::Lte, value.into())
    }

    /// Full-text match: `field match value`.
    pub fn matches(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::Match, value.into())
    }

    /// Membership of the field in an array value: `field in value`.
    pub fn in_(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::In, value.into())
    }

    /// Membership of the value in an array field: `value in field`.
    pub fn contains(field: impl Into<String>, value: impl Into<Operand>) -> Expr {
        Expr::field(field.into(), FieldOp::Contains, value.into())
    }

    pub fn defined(field: impl Into<String>) -> Expr {
        Expr::Exists(field.into(), true)
    }

    pub fn not_defined(field: impl Into<String>) -> Expr {
        Expr::Exists(field.into(), false)
    }

    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(exprs.into_iter().collect())
    }

    pub fn raw(condition: impl Into<String>) -> Expr {
        Expr::Raw(condition.into())
    }

    /// `_type == "<discriminant>"`
    pub fn type_is(discriminant: impl Into<String>) -> Expr {
        let discriminant: String = discriminant.into();
        Filter::eq(DISCRIMINANT_FIELD, discriminant)
    }
}

pub trait QueryVisitor {
    type Output;

    fn visit_and(&mut self, exprs: &[Expr]) -> Self::Output;
    fn visit_or(&mut self, exprs: &[Expr]) -> Self::Output;
    fn visit_not(&mut self, expr: &Expr) -> Self::Output;
    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Self::Output;
    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Operand) -> Self::Output;
    fn visit_raw(&mut self, condition: &str) -> Self::Output;

    fn visit_expr(&mut self, expr: &Expr) -> Self::Output {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Or(exprs) => self.visit_or(exprs),
            Expr::Not(expr) => self.visit_not(expr),
            Expr::Exists(field, should_exist) => self.visit_exists(field, *should_exist),
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
            Expr::Raw(condition) => self.visit_raw(condition),
        }
    }
}

/// Renders filter expressions as GROQ conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroqFilterTranslator;

impl GroqFilterTranslator {
    fn operand(value: &Operand) -> String {
        match value {
            Operand::Value(value) => value.to_string(),
            Operand::Param(name) => format!("${name}"),
        }
    }

    fn join(&mut self, exprs: &[Expr], separator: &str, empty: &str) -> String {
        if exprs.is_empty() {
            return empty.to_string();
        }

        exprs
            .iter()
            .map(|expr| {
                let groq = self.visit_expr(expr);
                match expr {
                    Expr::And(list) | Expr::Or(list) if list.len() > 1 => format!("({groq})"),
                    _ => groq,
                }
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl QueryVisitor for GroqFilterTranslator {
    type Output = String;

    fn visit_and(&mut self, exprs: &[Expr]) -> String {
        self.join(exprs, " && ", "true")
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> String {
        self.join(exprs, " || ", "false")
    }

    fn visit_not(&mut self, expr: &Expr) -> String {
        format!("!({})", self.visit_expr(expr))
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> String {
        if should_exist {
            format!("defined({field})")
        } else {
            format!("!defined({field})")
        }
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Operand) -> String {
        let value = Self::operand(value);

        match op {
            FieldOp::Contains => format!("{value} {} {field}", op.symbol()),
            _ => format!("{field} {} {value}", op.symbol()),
        }
    }

    fn visit_raw(&mut self, condition: &str) -> String {
        condition.to_string()
    }
}

/// Schema, filter conditions and slice of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPayload {
    /// Projection applied to each result.
    pub schema: Node,
    /// Index or range applied after the filters. `None` keeps every result.
    pub slice: Option<Slice>,
    /// Filters, each emitted as its own `[...]` group, in order.
    pub conditions: Vec<Expr>,
}

impl QueryPayload {
    pub fn new(schema: Node) -> Self {
        QueryPayload {
            schema,
            slice: None,
            conditions: Vec::new(),
        }
    }

    /// `*` + `[cond]` per condition + slice (`[]` when absent) + projection.
    pub fn serialize(&self) -> String {
        let mut translator = GroqFilterTranslator;
        let mut groq = String::from("*");

        for condition in &self.conditions {
            groq.push('[');
            groq.push_str(&translator.visit_expr(condition));
            groq.push(']');
        }

        match &self.slice {
            Some(slice) => groq.push_str(&slice.to_string()),
            None => groq.push_str("[]"),
        }

        groq.push_str(&self.schema.serialize());
        groq
    }

    fn with_condition(&self, condition: Expr) -> Self {
        let mut payload = self.clone();
        payload.conditions.push(condition);
        payload
    }

    fn with_schema(&self, schema: Node) -> Self {
        QueryPayload {
            schema,
            ..self.clone()
        }
    }

    fn with_slice(&self, slice: Slice) -> Self {
        QueryPayload {
            slice: Some(slice),
            ..self.clone()
        }
    }
}

/// A query yielding an array of results.
///
/// Every method returns a new query; the receiver can keep being reused.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayQuery {
    payload: QueryPayload,
}

impl ArrayQuery {
    pub fn new(payload: QueryPayload) -> Self {
        ArrayQuery { payload }
    }

    pub fn payload(&self) -> &QueryPayload {
        &self.payload
    }

    /// Replaces the projected schema.
    pub fn grab(&self, schema: impl Into<Node>) -> ArrayQuery {
        ArrayQuery::new(self.payload.with_schema(schema.into()))
    }

    /// Appends a filter condition group.
    pub fn filter(&self, condition: impl Into<Expr>) -> ArrayQuery {
        ArrayQuery::new(self.payload.with_condition(condition.into()))
    }

    /// Keeps results `from..to`.
    pub fn slice(&self, from: usize, to: usize) -> ArrayQuery {
        ArrayQuery::new(self.payload.with_slice(Slice::Range(from, to)))
    }

    /// Narrows to the result at `index`.
    pub fn nth(&self, index: usize) -> EntityQuery {
        EntityQuery::new(self.payload.with_slice(Slice::Index(index)))
    }

    pub fn first(&self) -> EntityQuery {
        self.nth(0)
    }

    pub fn serialize(&self) -> String {
        self.payload.serialize()
    }

    /// Schema of the whole response: an array of the projected schema.
    pub fn resolve_schema(&self) -> Node {
        Node::array(self.payload.schema.clone())
    }
}

/// A query yielding a single result, or null when nothing matches.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityQuery {
    payload: QueryPayload,
}

impl EntityQuery {
    pub fn new(payload: QueryPayload) -> Self {
        EntityQuery { payload }
    }

    pub fn payload(&self) -> &QueryPayload {
        &self.payload
    }

    pub fn grab(&self, schema: impl Into<Node>) -> EntityQuery {
        EntityQuery::new(self.payload.with_schema(schema.into()))
    }

    pub fn filter(&self, condition: impl Into<Expr>) -> EntityQuery {
        EntityQuery::new(self.payload.with_condition(condition.into()))
    }

    pub fn serialize(&self) -> String {
        self.payload.serialize()
    }

    pub fn resolve_schema(&self) -> Node {
        self.payload.schema.clone()
    }
}

/// Every document, projected as-is: `*[]`.
pub fn all_documents() -> ArrayQuery {
    ArrayQuery::new(QueryPayload::new(Node::unknown()))
}

/// Documents of the given type: `*[_type == "<type>"][]`.
pub fn filter_by_type(discriminant: impl Into<String>) -> ArrayQuery {
    all_documents().filter(Filter::type_is(discriminant))
}

/// Documents of the given type that also match `condition`, in a single filter group.
pub fn filter_by_type_where(
    discriminant: impl Into<String>,
    condition: impl Into<Expr>,
) -> ArrayQuery {
    all_documents().filter(Filter::type_is(discriminant).and(condition))
}
