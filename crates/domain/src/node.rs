//! Design-file node tree.
//!
//! Nodes mirror the upstream JSON shape: a handful of fields every node
//! carries (`id`, `type`, `name`, `visible`, `children`) plus an open map
//! of type-specific properties that round-trips untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Node type tag
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The `type` tag of a node.
///
/// Unrecognized tags are kept verbatim in [`NodeType::Other`] so that a
/// node survives a decode/encode cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Frame,
    Group,
    Vector,
    BooleanOperation,
    Star,
    Line,
    Text,
    Component,
    Instance,
    Canvas,
    Other(String),
}

impl NodeType {
    /// Tags accepted in a type allow-list.
    pub const KNOWN: &'static [&'static str] = &[
        "FRAME",
        "GROUP",
        "VECTOR",
        "BOOLEAN_OPERATION",
        "STAR",
        "LINE",
        "TEXT",
        "COMPONENT",
        "INSTANCE",
        "CANVAS",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Vector => "VECTOR",
            NodeType::BooleanOperation => "BOOLEAN_OPERATION",
            NodeType::Star => "STAR",
            NodeType::Line => "LINE",
            NodeType::Text => "TEXT",
            NodeType::Component => "COMPONENT",
            NodeType::Instance => "INSTANCE",
            NodeType::Canvas => "CANVAS",
            NodeType::Other(tag) => tag,
        }
    }

    /// Parse a tag, rejecting anything outside the fixed enumeration.
    pub fn parse_known(tag: &str) -> Option<Self> {
        match NodeType::from(tag.to_owned()) {
            NodeType::Other(_) => None,
            known => Some(known),
        }
    }

    /// Types that own an ordered child list.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeType::Frame
                | NodeType::Group
                | NodeType::BooleanOperation
                | NodeType::Component
                | NodeType::Instance
                | NodeType::Canvas
        )
    }
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "FRAME" => NodeType::Frame,
            "GROUP" => NodeType::Group,
            "VECTOR" => NodeType::Vector,
            "BOOLEAN_OPERATION" => NodeType::BooleanOperation,
            "STAR" => NodeType::Star,
            "LINE" => NodeType::Line,
            "TEXT" => NodeType::Text,
            "COMPONENT" => NodeType::Component,
            "INSTANCE" => NodeType::Instance,
            "CANVAS" => NodeType::Canvas,
            _ => NodeType::Other(tag),
        }
    }
}

impl From<NodeType> for String {
    fn from(t: NodeType) -> Self {
        match t {
            NodeType::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Node
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One element of the design-file tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Always present upstream, possibly empty. `None` only once the
    /// property has been excluded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Upstream omits `visible` when the node is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Every other property, ordered by key.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            name: Some(name.into()),
            visible: None,
            children: Vec::new(),
            properties: Map::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Text content of a TEXT node.
    pub fn characters(&self) -> Option<&str> {
        self.properties.get("characters").and_then(Value::as_str)
    }

    /// Remove a top-level property by name.
    ///
    /// `id` and `type` are identity and are never removed; the call
    /// returns `false` for them.
    pub fn remove_property(&mut self, key: &str) -> bool {
        match key {
            "id" | "type" => false,
            "name" => self.name.take().is_some(),
            "visible" => self.visible.take().is_some(),
            "children" => !std::mem::take(&mut self.children).is_empty(),
            _ => self.properties.remove(key).is_some(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Document + upstream envelope
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Root container. Its children seed traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default = "d_document_type")]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            id: "0:0".into(),
            name: "Document".into(),
            node_type: d_document_type(),
            children,
        }
    }
}

fn d_document_type() -> String {
    "DOCUMENT".into()
}

/// File envelope returned by the files endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub document: Option<Document>,
}

impl FileResponse {
    pub fn into_document(self) -> Result<Document> {
        self.document.ok_or_else(|| {
            Error::InvalidUpstreamData(format!("file {:?} has no document root", self.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_type_round_trips() {
        let node: Node = serde_json::from_value(json!({
            "id": "1:2",
            "type": "SECTION",
            "name": "Hero"
        }))
        .unwrap();
        assert_eq!(node.node_type, NodeType::Other("SECTION".into()));
        assert_eq!(serde_json::to_value(&node).unwrap()["type"], "SECTION");
    }

    #[test]
    fn visible_defaults_to_true() {
        let node: Node = serde_json::from_value(json!({ "id": "1:1", "type": "FRAME" })).unwrap();
        assert!(node.is_visible());
        assert!(node.name.is_none());
        assert!(node.children.is_empty());
    }

    #[test]
    fn extra_properties_are_preserved() {
        let raw = json!({
            "id": "4:2",
            "type": "TEXT",
            "name": "Title",
            "characters": "Hello",
            "style": { "fontSize": 24 }
        });
        let node: Node = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(node.characters(), Some("Hello"));
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }

    #[test]
    fn nested_children_decode() {
        let node: Node = serde_json::from_value(json!({
            "id": "1:1",
            "type": "FRAME",
            "children": [
                { "id": "1:2", "type": "GROUP", "children": [ { "id": "1:3", "type": "STAR" } ] }
            ]
        }))
        .unwrap();
        assert_eq!(node.children[0].children[0].node_type, NodeType::Star);
    }

    #[test]
    fn identity_properties_cannot_be_removed() {
        let mut node = Node::new("1:1", NodeType::Frame, "Card")
            .with_property("fills", json!([]));
        assert!(!node.remove_property("id"));
        assert!(!node.remove_property("type"));
        assert!(node.remove_property("fills"));
        assert!(node.remove_property("name"));
        assert_eq!(node.id, "1:1");
        assert_eq!(node.node_type, NodeType::Frame);
        assert!(node.properties.is_empty());
    }

    #[test]
    fn empty_name_is_kept() {
        let node: Node =
            serde_json::from_value(json!({ "id": "1:1", "type": "COMPONENT", "name": "" })).unwrap();
        assert_eq!(node.name.as_deref(), Some(""));
        assert_eq!(serde_json::to_value(&node).unwrap()["name"], "");
    }

    #[test]
    fn document_type_round_trips() {
        let doc: Document = serde_json::from_value(json!({
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": []
        }))
        .unwrap();
        assert_eq!(doc.node_type, "DOCUMENT");
        assert_eq!(serde_json::to_value(&doc).unwrap()["type"], "DOCUMENT");
        assert_eq!(Document::new(Vec::new()).node_type, "DOCUMENT");
    }

    #[test]
    fn containers_are_the_child_bearing_types() {
        assert!(NodeType::Canvas.is_container());
        assert!(NodeType::BooleanOperation.is_container());
        assert!(!NodeType::Text.is_container());
        assert!(!NodeType::Other("SECTION".into()).is_container());
    }

    #[test]
    fn parse_known_rejects_unknown_tags() {
        assert_eq!(NodeType::parse_known("TEXT"), Some(NodeType::Text));
        assert_eq!(NodeType::parse_known("text"), None);
        assert_eq!(NodeType::parse_known("SLICE"), None);
    }

    #[test]
    fn missing_document_is_invalid_upstream_data() {
        let resp: FileResponse = serde_json::from_value(json!({ "name": "Empty" })).unwrap();
        let err = resp.into_document().unwrap_err();
        assert!(matches!(err, Error::InvalidUpstreamData(_)));
    }

    #[test]
    fn file_response_with_document() {
        let resp: FileResponse = serde_json::from_value(json!({
            "name": "Design",
            "lastModified": "2024-01-01T00:00:00Z",
            "document": { "id": "0:0", "name": "Document", "children": [ { "id": "0:1", "type": "CANVAS" } ] }
        }))
        .unwrap();
        assert_eq!(resp.last_modified.as_deref(), Some("2024-01-01T00:00:00Z"));
        let doc = resp.into_document().unwrap();
        assert_eq!(doc.node_type, "DOCUMENT");
        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.children[0].node_type, NodeType::Canvas);
    }
}
