//! Deployment descriptor tree
//!
//! [`Node`] is the format-independent tree the substitution engine walks.
//! JSON and YAML documents convert into it and back without loss for
//! everything a descriptor normally holds. Mapping keys are kept as strings
//! in their original order; non-string YAML keys are rendered to their
//! textual form. YAML tags such as `!Ref` or `!GetAtt` are carried on
//! [`Node::Tagged`] and written back out unchanged.

use indexmap::IndexMap;
use params_fs::NormalizedPath;
use serde_yaml::value::{Tag, TaggedValue};

use crate::{Error, Result};

/// A scalar leaf of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(IndexMap<String, Node>),
    /// A YAML-tagged node; `tag` includes the leading `!`
    Tagged { tag: String, value: Box<Node> },
}

impl Node {
    /// Shorthand for a string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Mapping(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(if let Some(i) = n.as_i64() {
                Scalar::Integer(i)
            } else if let Some(u) = n.as_u64() {
                Scalar::Unsigned(u)
            } else {
                Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
            }),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<Node> for serde_json::Value {
    fn from(node: Node) -> Self {
        use serde_json::Value;

        match node {
            Node::Scalar(Scalar::Null) => Value::Null,
            Node::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Node::Scalar(Scalar::Integer(i)) => Value::Number(i.into()),
            Node::Scalar(Scalar::Unsigned(u)) => Value::Number(u.into()),
            // JSON has no representation for NaN or infinities
            Node::Scalar(Scalar::Float(f)) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Node::Scalar(Scalar::String(s)) => Value::String(s),
            Node::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Mapping(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            // JSON has no tags
            Node::Tagged { value, .. } => Value::from(*value),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match key {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl From<serde_yaml::Value> for Node {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(if let Some(i) = n.as_i64() {
                Scalar::Integer(i)
            } else if let Some(u) = n.as_u64() {
                Scalar::Unsigned(u)
            } else {
                Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
            }),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key(k), Node::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                Node::Tagged {
                    tag: tag.to_string(),
                    value: Box::new(Node::from(value)),
                }
            }
        }
    }
}

impl From<Node> for serde_yaml::Value {
    fn from(node: Node) -> Self {
        use serde_yaml::Value;

        match node {
            Node::Scalar(Scalar::Null) => Value::Null,
            Node::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Node::Scalar(Scalar::Integer(i)) => Value::Number(i.into()),
            Node::Scalar(Scalar::Unsigned(u)) => Value::Number(u.into()),
            Node::Scalar(Scalar::Float(f)) => Value::Number(f.into()),
            Node::Scalar(Scalar::String(s)) => Value::String(s),
            Node::Sequence(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            Node::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            ),
            // `Tag::new` rejects the empty and non-specific tags
            Node::Tagged { tag, value } if tag.trim_start_matches('!').is_empty() => {
                Value::from(*value)
            }
            Node::Tagged { tag, value } => Value::Tagged(Box::new(TaggedValue {
                tag: Tag::new(tag),
                value: Value::from(*value),
            })),
        }
    }
}

/// Serialization format of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from the file extension.
    ///
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    pub fn parse(&self, content: &str) -> Result<Node> {
        let parse_error = |message: String| Error::DocumentParse {
            format: self.name().into(),
            message,
        };

        match self {
            Self::Json => serde_json::from_str::<serde_json::Value>(content)
                .map(Node::from)
                .map_err(|e| parse_error(e.to_string())),
            Self::Yaml => serde_yaml::from_str::<serde_yaml::Value>(content)
                .map(Node::from)
                .map_err(|e| parse_error(e.to_string())),
        }
    }

    pub fn render(&self, node: &Node) -> Result<String> {
        let render_error = |message: String| Error::DocumentRender {
            format: self.name().into(),
            message,
        };

        match self {
            Self::Json => serde_json::to_string_pretty(&serde_json::Value::from(node.clone()))
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| render_error(e.to_string())),
            Self::Yaml => serde_yaml::to_string(&serde_yaml::Value::from(node.clone()))
                .map_err(|e| render_error(e.to_string())),
        }
    }
}
