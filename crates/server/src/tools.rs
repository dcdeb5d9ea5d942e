//! The chunked node tool: schema, argument validation and invocation.

use std::collections::BTreeSet;

use fc_domain::config::TraversalConfig;
use fc_domain::error::{Error, Result};
use fc_domain::node::NodeType;
use fc_traversal::{ChunkedReader, DocumentSource, TraversalResult};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::protocol::ToolDef;

pub const CHUNKED_NODES_TOOL: &str = "get_file_nodes_chunked";

/// Definition advertised by `tools/list`.
pub fn chunked_nodes_tool() -> ToolDef {
    ToolDef {
        name: CHUNKED_NODES_TOOL.into(),
        description: "Enumerate the nodes of a Figma file page by page. Nodes come out in \
                      depth-first document order; pass `nextCursor` back as `cursor` to \
                      continue with the same file and the same filters."
            .into(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "fileKey": { "type": "string", "description": "Key of the Figma file" },
                "pageSize": { "type": "integer", "minimum": 1, "description": "Maximum nodes per page" },
                "maxMemoryMB": { "type": "number", "exclusiveMinimum": 0, "description": "Size budget in MiB" },
                "maxResponseSize": { "type": "number", "exclusiveMinimum": 0, "description": "Response size budget in MiB; the smaller budget governs" },
                "nodeTypes": {
                    "type": "array",
                    "minItems": 1,
                    "items": { "type": "string", "enum": NodeType::KNOWN },
                    "description": "Only admit nodes of these types"
                },
                "maxDepth": { "type": "integer", "minimum": 0, "description": "Deepest level to admit; top-level pages are depth 0" },
                "excludeProps": { "type": "array", "items": { "type": "string" }, "description": "Properties to strip (id and type are always kept)" },
                "summarizeNodes": { "type": "boolean", "description": "Reduce nodes to their minimal shape" },
                "cursor": { "type": "string", "description": "Resume token from a previous page" }
            },
            "required": ["fileKey"]
        }),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Arguments
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Raw tool arguments as the client sends them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkedNodesArgs {
    pub file_key: String,
    pub page_size: Option<i64>,
    #[serde(rename = "maxMemoryMB")]
    pub max_memory_mb: Option<f64>,
    pub max_response_size: Option<f64>,
    pub node_types: Option<Vec<String>>,
    pub max_depth: Option<i64>,
    pub exclude_props: Option<Vec<String>>,
    pub summarize_nodes: Option<bool>,
    pub cursor: Option<String>,
}

impl ChunkedNodesArgs {
    pub fn parse(arguments: Value) -> Result<Self> {
        let args: Self = serde_json::from_value(arguments)
            .map_err(|e| Error::InvalidArgument(e.to_string()))?;
        if args.file_key.trim().is_empty() {
            return Err(Error::InvalidArgument("fileKey must not be empty".into()));
        }
        Ok(args)
    }

    /// Validate the limits and layer them over `defaults`.
    pub fn to_config(&self, defaults: &TraversalConfig) -> Result<TraversalConfig> {
        let mut config = defaults.clone();

        if let Some(page_size) = self.page_size {
            if page_size < 1 {
                return Err(Error::InvalidArgument(format!(
                    "pageSize must be at least 1, got {page_size}"
                )));
            }
            config.page_size = usize::try_from(page_size)
                .map_err(|_| Error::InvalidArgument(format!("pageSize {page_size} is too large")))?;
        }

        if let Some(budget) = self.max_memory_mb {
            config.max_memory_mb = positive_budget("maxMemoryMB", budget)?;
        }
        if let Some(budget) = self.max_response_size {
            config.max_response_size = positive_budget("maxResponseSize", budget)?;
        }

        if let Some(tags) = &self.node_types {
            if tags.is_empty() {
                return Err(Error::InvalidArgument("nodeTypes must not be empty".into()));
            }
            let types = tags
                .iter()
                .map(|tag| {
                    NodeType::parse_known(tag).ok_or_else(|| {
                        Error::InvalidArgument(format!("unrecognized node type {tag:?}"))
                    })
                })
                .collect::<Result<BTreeSet<_>>>()?;
            config.node_types = Some(types);
        }

        if let Some(depth) = self.max_depth {
            let depth = u32::try_from(depth).map_err(|_| {
                Error::InvalidArgument(format!("maxDepth must be a non-negative integer, got {depth}"))
            })?;
            config.max_depth = Some(depth);
        }

        if let Some(props) = &self.exclude_props {
            config.exclude_props = props.iter().cloned().collect();
        }
        if let Some(summarize) = self.summarize_nodes {
            config.summarize_nodes = summarize;
        }

        Ok(config)
    }
}

fn positive_budget(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Invocation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Run the tool with a fresh traversal session.
pub async fn call_chunked_nodes<S: DocumentSource>(
    reader: &ChunkedReader<S>,
    defaults: &TraversalConfig,
    arguments: Value,
) -> Result<TraversalResult> {
    let args = ChunkedNodesArgs::parse(arguments)?;
    let config = args.to_config(defaults)?;
    reader
        .read(&args.file_key, args.cursor.as_deref(), &config)
        .await
}
