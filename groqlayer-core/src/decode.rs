//! Response validation against a schema's data shape.
//!
//! A [`Decoder`] checks a JSON response against the resolved schema of a query and either hands
//! the value back or reports every mismatch as a [`ValidationIssue`]. The default
//! [`ShapeDecoder`] walks the node tree and collects issues with JSON-pointer paths
//! (`""` for the root, `/0/title` for nested values).
//!
//! [`decode_as`] turns a validated value into a concrete Rust type.

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::schema::{KEY_FIELD, Kind, Node, Properties, Shape};

/// A single mismatch between a response and its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON pointer to the offending value.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "/: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A rejected response: the issues found and the untouched value.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeFailure {
    pub issues: Vec<ValidationIssue>,
    pub value: Value,
}

/// Validates a response against a schema.
pub trait Decoder: Send + Sync + fmt::Debug {
    fn decode(&self, schema: &Node, value: Value) -> Result<Value, DecodeFailure>;
}

impl<D: Decoder + ?Sized> Decoder for &D {
    fn decode(&self, schema: &Node, value: Value) -> Result<Value, DecodeFailure> {
        (**self).decode(schema, value)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn decode(&self, schema: &Node, value: Value) -> Result<Value, DecodeFailure> {
        (**self).decode(schema, value)
    }
}

/// Structural decoder driven by node kinds and shapes.
///
/// Objects may carry attributes the schema does not name. A missing attribute is accepted when
/// its node accepts `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeDecoder;

impl ShapeDecoder {
    pub fn new() -> Self {
        ShapeDecoder
    }

    /// Returns every issue found in `value`, without consuming it.
    pub fn check(&self, schema: &Node, value: &Value) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_node(schema, value, "", &mut issues);
        issues
    }
}

impl Decoder for ShapeDecoder {
    fn decode(&self, schema: &Node, value: Value) -> Result<Value, DecodeFailure> {
        let issues = self.check(schema, &value);

        if issues.is_empty() {
            Ok(value)
        } else {
            Err(DecodeFailure { issues, value })
        }
    }
}

/// Deserializes a validated value into `T`, reporting the path of the first mismatch.
///
/// Paths use serde's notation (`director.name`, `[0].title`, `.` for the root).
pub fn decode_as<T: DeserializeOwned>(value: Value) -> Result<T, ValidationIssue> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        ValidationIssue::new(path, err.into_inner().to_string())
    })
}

fn check_node(node: &Node, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    match node.kind() {
        Kind::Leaf(shape) => check_shape(shape, value, path, issues),
        Kind::Raw { schema, .. } => check_node(schema, value, path, issues),
        Kind::Nullable(inner) => {
            if !value.is_null() {
                check_node(inner, value, path, issues);
            }
        }
        Kind::Projection { properties, .. } => check_object(properties, value, path, issues),
        Kind::Collection { element, .. } => {
            check_array(element, value, path, element.is_structured(), issues)
        }
        Kind::ConditionalUnion { branches, .. } => check_union(
            branches.iter().map(|branch| &branch.node),
            value,
            path,
            issues,
        ),
    }
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|n| n.fract() == 0.0)
}

fn check_shape(shape: &Shape, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let expected = match shape {
        Shape::Unknown => return,
        Shape::Null if !value.is_null() => "Expected null",
        Shape::Boolean if !value.is_boolean() => "Expected boolean",
        Shape::Number if !value.is_number() => "Expected number",
        Shape::Integer if !is_integer(value) => "Expected integer",
        Shape::String if !value.is_string() => "Expected string",
        Shape::Literal(literal) => {
            if value != literal {
                issues.push(ValidationIssue::new(path, format!("Expected {literal}")));
            }
            return;
        }
        Shape::Object(properties) => return check_object(properties, value, path, issues),
        Shape::Record(item) => return check_record(item, value, path, issues),
        Shape::Array(item) => return check_array(item, value, path, false, issues),
        Shape::Union(members) => return check_union(members, value, path, issues),
        _ => return,
    };

    issues.push(ValidationIssue::new(path, expected));
}

fn check_object(
    properties: &Properties,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(object) = value.as_object() else {
        issues.push(ValidationIssue::new(path, "Expected object"));
        return;
    };

    for (key, node) in properties {
        let child = pointer(path, key);

        match object.get(key) {
            Some(value) => check_node(node, value, &child, issues),
            None if accepts_null(node) => {}
            None => issues.push(ValidationIssue::new(child, "Expected required property")),
        }
    }
}

fn check_record(item: &Node, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(object) = value.as_object() else {
        issues.push(ValidationIssue::new(path, "Expected object"));
        return;
    };

    for (key, value) in object {
        check_node(item, value, &pointer(path, key), issues);
    }
}

fn check_array(
    item: &Node,
    value: &Value,
    path: &str,
    keyed: bool,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(items) = value.as_array() else {
        issues.push(ValidationIssue::new(path, "Expected array"));
        return;
    };

    for (index, value) in items.iter().enumerate() {
        let child = pointer(path, &index.to_string());
        check_node(item, value, &child, issues);

        if keyed {
            if let Some(key) = value.get(KEY_FIELD) {
                if !(key.is_string() || key.is_null()) {
                    issues.push(ValidationIssue::new(
                        pointer(&child, KEY_FIELD),
                        "Expected string",
                    ));
                }
            }
        }
    }
}

fn check_union<'a>(
    members: impl IntoIterator<Item = &'a Node>,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let matched = members.into_iter().any(|member| {
        let mut scratch = Vec::new();
        check_node(member, value, path, &mut scratch);
        scratch.is_empty()
    });

    if !matched {
        issues.push(ValidationIssue::new(path, "Expected union value"));
    }
}

fn accepts_null(node: &Node) -> bool {
    let mut scratch = Vec::new();
    check_node(node, &Value::Null, "", &mut scratch);
    scratch.is_empty()
}

fn pointer(parent: &str, segment: &str) -> String {
    format!("{parent}/{}", segment.replace('~', "~0").replace('/', "~1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypedProjection;
    use serde_json::json;

    fn movies() -> Node {
        Node::collection(Node::projection([
            ("title", Node::string()),
            ("director", Node::projection([("name", Node::string())])),
        ]))
    }

    #[test]
    fn accepts_matching_response() {
        let value = json!([
            {"_key": null, "title": "Alien", "director": {"name": "Ridley Scott"}},
            {"_key": "b", "title": "Heat", "director": {"name": "Michael Mann"}, "year": 1995},
        ]);

        assert_eq!(ShapeDecoder.decode(&movies(), value.clone()), Ok(value));
    }

    #[test]
    fn reports_missing_properties_with_paths() {
        let failure = ShapeDecoder
            .decode(&movies(), json!([{"_type": "none"}]))
            .unwrap_err();

        assert_eq!(
            failure.issues,
            vec![
                ValidationIssue::new("/0/title", "Expected required property"),
                ValidationIssue::new("/0/director", "Expected required property"),
            ]
        );
        assert_eq!(failure.value, json!([{"_type": "none"}]));
    }

    #[test]
    fn reports_wrong_leaf_types() {
        let issues = ShapeDecoder.check(&movies(), &json!([{"title": 3, "director": {"name": "x"}}]));

        assert_eq!(issues, vec![ValidationIssue::new("/0/title", "Expected string")]);
    }

    #[test]
    fn rejects_non_string_keys_in_structured_collections() {
        let issues = ShapeDecoder.check(
            &movies(),
            &json!([{"_key": 1, "title": "x", "director": {"name": "y"}}]),
        );

        assert_eq!(issues, vec![ValidationIssue::new("/0/_key", "Expected string")]);
    }

    #[test]
    fn nullable_properties_may_be_absent() {
        let schema = Node::projection([
            ("title", Node::string()),
            ("subtitle", Node::nullable(Node::string())),
        ]);

        assert!(ShapeDecoder.check(&schema, &json!({"title": "x"})).is_empty());
        assert!(ShapeDecoder.check(&Node::nullable(schema), &Value::Null).is_empty());
    }

    #[test]
    fn root_issue_has_empty_path() {
        let issues = ShapeDecoder.check(&movies(), &json!({"not": "an array"}));

        assert_eq!(issues, vec![ValidationIssue::new("", "Expected array")]);
        assert_eq!(issues[0].to_string(), "/: Expected array");
    }

    #[test]
    fn typed_union_falls_back_to_unknown_branch() {
        let schema = Node::typed_union([TypedProjection::new("person", [("name", Node::string())])]);

        assert!(ShapeDecoder.check(&schema, &json!({"_type": "person", "name": "Ada"})).is_empty());
        assert!(
            ShapeDecoder
                .check(&schema, &json!({"_rawType": "place", "_type": "unknown"}))
                .is_empty()
        );
        assert_eq!(
            ShapeDecoder.check(&schema, &json!({"_type": "place"})),
            vec![ValidationIssue::new("", "Expected union value")]
        );
    }

    #[test]
    fn literals_compare_exactly() {
        let issues = ShapeDecoder.check(&Node::literal("movie"), &json!("show"));

        assert_eq!(issues, vec![ValidationIssue::new("", r#"Expected "movie""#)]);
    }

    #[test]
    fn records_check_every_value() {
        let schema = Node::record(Node::integer());
        let issues = ShapeDecoder.check(&schema, &json!({"a": 1, "b/c": 1.5}));

        assert_eq!(issues, vec![ValidationIssue::new("/b~1c", "Expected integer")]);
    }

    #[test]
    fn integers_accept_whole_floats() {
        assert!(ShapeDecoder.check(&Node::integer(), &json!(1.0)).is_empty());
        assert!(ShapeDecoder.check(&Node::integer(), &json!(-40)).is_empty());
        assert_eq!(
            ShapeDecoder.check(&Node::integer(), &json!(1.5)),
            vec![ValidationIssue::new("", "Expected integer")]
        );
        assert_eq!(
            ShapeDecoder.check(&Node::integer(), &json!("1")),
            vec![ValidationIssue::new("", "Expected integer")]
        );
    }

    #[test]
    fn decode_as_reports_serde_path() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Movie {
            title: String,
        }

        let issue = decode_as::<Vec<Movie>>(json!([{"title": 1}])).unwrap_err();

        assert_eq!(issue.path, "[0].title");
    }
}
