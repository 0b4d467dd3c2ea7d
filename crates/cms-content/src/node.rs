//! Style node wire model
//!
//! Wire shape as served by the CMS:
//!
//! ```json
//! { "id": 12, "style_name": "heading", "title": { "content": "Welcome" }, "children": [ ... ] }
//! ```
//!
//! Only `id`, `style_name` and `children` are interpreted here. Every other
//! key is kept as an opaque field for the type-specific renderers.

use crate::error::{ContentError, RenderError};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One unit of renderable CMS content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleNode {
    /// Stable numeric identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Dispatch tag
    #[serde(default)]
    pub style_name: String,

    /// Ordered children; `None` entries are holes
    #[serde(
        default,
        deserialize_with = "nullable_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Option<StyleNode>>,

    /// Type-specific fields
    #[serde(flatten)]
    pub fields: IndexMap<String, serde_json::Value>,
}

fn nullable_children<'de, D>(deserializer: D) -> Result<Vec<Option<StyleNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Option<StyleNode>>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StyleNode {
    /// Create node with tag
    pub fn new(style_name: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
            ..Self::default()
        }
    }

    /// With id
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// With field wrapped as `{ "content": value }`
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.fields.insert(
            name.into(),
            serde_json::json!({ "content": content.into() }),
        );
        self
    }

    /// With child appended
    #[must_use]
    pub fn with_child(mut self, child: StyleNode) -> Self {
        self.children.push(Some(child));
        self
    }

    /// With hole appended
    #[must_use]
    pub fn with_hole(mut self) -> Self {
        self.children.push(None);
        self
    }

    /// Parse a single node
    ///
    /// # Errors
    /// Returns [`ContentError::Parse`] if `json` is not a node
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a list of top-level sections, holes included
    ///
    /// # Errors
    /// Returns [`ContentError::Parse`] if `json` is not a list of nodes
    pub fn list_from_json(json: &str) -> Result<Vec<Option<Self>>, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Raw field value
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    /// Textual content of a field
    ///
    /// Accepts `{ "content": scalar }`, a bare scalar, or `null`.
    /// Numbers and booleans are rendered as text.
    ///
    /// # Errors
    /// Returns [`RenderError::MalformedField`] for arrays, objects without
    /// `content`, or non-scalar `content`
    pub fn content(&self, name: &str) -> Result<Option<String>, RenderError> {
        let Some(value) = self.fields.get(name) else {
            return Ok(None);
        };
        let inner = match value {
            serde_json::Value::Object(map) => map
                .get("content")
                .ok_or_else(|| RenderError::malformed(name, "object without 'content'"))?,
            other => other,
        };
        match inner {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(s) => Ok(Some(s.clone())),
            serde_json::Value::Number(n) => Ok(Some(n.to_string())),
            serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Err(RenderError::malformed(name, "content is not a scalar"))
            }
        }
    }

    /// Non-empty content of a required field
    ///
    /// # Errors
    /// Returns [`RenderError::MissingField`] if absent or empty, or the
    /// errors of [`StyleNode::content`]
    pub fn required(&self, name: &'static str) -> Result<String, RenderError> {
        match self.content(name)? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(RenderError::MissingField(name)),
        }
    }
}

/// Identity of a rendered node among its siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKey {
    /// Derived from the node's id
    Id(u64),

    /// Positional fallback when the node has no id
    Index(usize),
}

impl NodeKey {
    /// Key for a node at `index` among its siblings
    #[must_use]
    pub fn for_node(node: &StyleNode, index: usize) -> Self {
        node.id.map_or(Self::Index(index), Self::Id)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id-{id}"),
            Self::Index(i) => write!(f, "idx-{i}"),
        }
    }
}
