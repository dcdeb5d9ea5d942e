use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::node::NodeType;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Traversal limits and filters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Limits and filters applied to one chunked traversal.
///
/// Budgets are expressed in MiB of canonical JSON. When both budgets are
/// set, the smaller one governs (see [`TraversalConfig::effective_budget`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Maximum admitted nodes per page.
    #[serde(default = "d_page_size")]
    pub page_size: usize,
    #[serde(default = "d_max_memory_mb")]
    pub max_memory_mb: f64,
    #[serde(default = "d_max_response_size")]
    pub max_response_size: f64,
    /// Type allow-list. `None` admits every type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_types: Option<BTreeSet<NodeType>>,
    /// Deepest admitted level; the document's children are depth 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    /// Property names stripped from admitted nodes. `id` and `type` are exempt.
    #[serde(default)]
    pub exclude_props: BTreeSet<String>,
    #[serde(default)]
    pub summarize_nodes: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            page_size: d_page_size(),
            max_memory_mb: d_max_memory_mb(),
            max_response_size: d_max_response_size(),
            node_types: None,
            max_depth: None,
            exclude_props: BTreeSet::new(),
            summarize_nodes: false,
        }
    }
}

impl TraversalConfig {
    /// The size ceiling that actually governs admission.
    pub fn effective_budget(&self) -> f64 {
        self.max_memory_mb.min(self.max_response_size)
    }

    pub fn allows_type(&self, node_type: &NodeType) -> bool {
        self.node_types
            .as_ref()
            .map_or(true, |types| types.contains(node_type))
    }

    pub fn allows_depth(&self, depth: u32) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }

    /// Whether children of a node at `depth` are worth visiting.
    pub fn expands_below(&self, depth: u32) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    /// Upstream fetch depth needed to materialize every level this
    /// config can admit. The upstream counts the document itself as level 0.
    pub fn fetch_depth(&self) -> Option<u32> {
        self.max_depth.map(|d| d.saturating_add(1))
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_page_size() -> usize {
    100
}
fn d_max_memory_mb() -> f64 {
    512.0
}
fn d_max_response_size() -> f64 {
    50.0
}
