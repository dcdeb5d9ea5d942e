//! Lossy reduction of a node to the minimal shape of its type.

use fc_domain::node::{Node, NodeType};
use serde_json::{json, Map, Value};

/// Replace `node` with the smallest node of the same type that still
/// carries its identity, visibility and the properties the type requires.
///
/// Containers keep their children as they are. A missing `visible` is
/// filled in as `true`; `name` is carried over as found.
pub fn summarize(node: Node) -> Node {
    let Node {
        id,
        node_type,
        name,
        visible,
        children,
        mut properties,
    } = node;

    let mut kept = Map::new();
    match &node_type {
        NodeType::Text => {
            let characters = properties
                .remove("characters")
                .unwrap_or_else(|| Value::String(String::new()));
            kept.insert("characters".into(), characters);
            kept.insert("style".into(), default_text_style());
        }
        NodeType::Component | NodeType::Instance => {
            if let Some(component_id) = properties.remove("componentId") {
                kept.insert("componentId".into(), component_id);
            }
        }
        NodeType::BooleanOperation => {
            if let Some(op) = properties.remove("booleanOperation") {
                kept.insert("booleanOperation".into(), op);
            }
        }
        _ => {}
    }

    // Unknown types keep whatever children they came with.
    let children = if node_type.is_container() || matches!(node_type, NodeType::Other(_)) {
        children
    } else {
        Vec::new()
    };

    Node {
        id,
        node_type,
        name,
        visible: Some(visible.unwrap_or(true)),
        children,
        properties: kept,
    }
}

/// Style attached to every summarized TEXT node.
pub fn default_text_style() -> Value {
    json!({
        "fontFamily": "Inter",
        "fontWeight": 400,
        "fontSize": 14,
        "letterSpacing": 0,
        "lineHeightPx": 20,
        "textAlignHorizontal": "LEFT",
        "textAlignVertical": "TOP"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_keeps_characters_and_gets_default_style() {
        let node = Node::new("2:1", NodeType::Text, "Heading")
            .with_property("characters", json!("Welcome"))
            .with_property("style", json!({ "fontFamily": "Roboto", "fontSize": 48 }))
            .with_property("fills", json!([{ "type": "SOLID" }]));

        let summary = summarize(node);
        assert_eq!(summary.characters(), Some("Welcome"));
        assert_eq!(summary.properties["style"], default_text_style());
        assert!(!summary.properties.contains_key("fills"));
        assert_eq!(summary.visible, Some(true));
    }

    #[test]
    fn text_without_characters_gets_empty_string() {
        let summary = summarize(Node::new("2:2", NodeType::Text, ""));
        assert_eq!(summary.characters(), Some(""));
    }

    #[test]
    fn frame_keeps_children_and_drops_visuals() {
        let node = Node::new("3:1", NodeType::Frame, "Card")
            .with_property("fills", json!([]))
            .with_property("effects", json!([]))
            .with_property("absoluteBoundingBox", json!({ "x": 0, "y": 0 }))
            .with_children(vec![Node::new("3:2", NodeType::Vector, "Icon")]);

        let summary = summarize(node);
        assert_eq!(summary.children.len(), 1);
        assert!(summary.properties.is_empty());
    }

    #[test]
    fn vector_degrades_to_base_shape() {
        let node = Node::new("4:1", NodeType::Vector, "Path")
            .with_property("fillGeometry", json!([{ "path": "M0 0" }]));
        let summary = summarize(node);
        assert!(summary.properties.is_empty());
        assert!(summary.children.is_empty());
    }

    #[test]
    fn hidden_state_is_kept() {
        let mut node = Node::new("5:1", NodeType::Group, "Hidden");
        node.visible = Some(false);
        assert_eq!(summarize(node).visible, Some(false));
    }

    #[test]
    fn unknown_type_keeps_children() {
        let node = Node::new("6:1", NodeType::Other("SECTION".into()), "Section")
            .with_property("sectionContentsHidden", json!(false))
            .with_children(vec![Node::new("6:2", NodeType::Frame, "Inner")]);
        let summary = summarize(node);
        assert_eq!(summary.node_type, NodeType::Other("SECTION".into()));
        assert_eq!(summary.children.len(), 1);
        assert!(summary.properties.is_empty());
    }

    #[test]
    fn empty_component_name_survives() {
        let node = Node::new("c", NodeType::Component, "")
            .with_property("componentId", json!("1"))
            .with_property("fills", json!([]));
        let json = serde_json::to_value(summarize(node)).unwrap();
        assert_eq!(json["name"], "");
        assert_eq!(json["componentId"], "1");
        assert!(json.get("fills").is_none());
    }

    #[test]
    fn boolean_operation_keeps_operator() {
        let node = Node::new("7:1", NodeType::BooleanOperation, "Union")
            .with_property("booleanOperation", json!("UNION"))
            .with_property("strokes", json!([]));
        let summary = summarize(node);
        assert_eq!(summary.properties.len(), 1);
        assert_eq!(summary.properties["booleanOperation"], "UNION");
    }
}
