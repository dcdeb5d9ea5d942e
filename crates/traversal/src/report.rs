use fc_domain::node::Node;
use serde::{Deserialize, Serialize};

/// Why a traversal call stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HaltReason {
    /// The walk ran out of nodes.
    Drained,
    /// The page reached `page_size`.
    PageFull,
    /// The session's running size reached the budget.
    BudgetExhausted,
    /// The next node would not fit in what is left of the budget.
    OverBudget,
}

impl HaltReason {
    pub fn as_str(self) -> &'static str {
        match self {
            HaltReason::Drained => "drained",
            HaltReason::PageFull => "pageFull",
            HaltReason::BudgetExhausted => "budgetExhausted",
            HaltReason::OverBudget => "overBudget",
        }
    }
}

/// Per-call counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalStats {
    /// Walk steps consumed by this call (fast-forwarded steps excluded).
    pub visited: usize,
    pub admitted: usize,
    pub skipped_duplicate: usize,
    pub skipped_type: usize,
    pub skipped_depth: usize,
    pub halt_reason: HaltReason,
}

impl Default for TraversalStats {
    fn default() -> Self {
        Self {
            visited: 0,
            admitted: 0,
            skipped_duplicate: 0,
            skipped_type: 0,
            skipped_depth: 0,
            halt_reason: HaltReason::Drained,
        }
    }
}

/// One page of a chunked traversal, ready for JSON serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalResult {
    /// Admitted nodes in walk order.
    pub nodes: Vec<Node>,
    /// The session's cumulative size figure, in budget units.
    pub memory_usage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub stats: TraversalStats,
}
