//! Per-node admission decision.

use fc_domain::config::TraversalConfig;
use fc_domain::error::Result;
use fc_domain::node::Node;

use crate::session::TraversalSession;
use crate::size::estimate_size;
use crate::summarize::summarize;

/// Why a node was left out of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// Already admitted earlier in this session.
    Duplicate,
    /// Type not in the allow-list.
    TypeFiltered,
    /// Deeper than `max_depth`.
    TooDeep,
    /// Admitting it would push the session past the budget.
    OverBudget { size: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// The node as it goes into the page, already transformed.
    Admit(Node),
    Skip(SkipReason),
}

/// Decide whether `node`, found at `depth`, joins the page.
///
/// Checks run in order and stop at the first failure: dedup, type
/// allow-list, depth, then size against what is left of the budget. On
/// admission the node is stripped of excluded properties, summarized when
/// configured, and charged to the session at its pre-transform size.
pub fn evaluate(
    session: &mut TraversalSession,
    config: &TraversalConfig,
    node: &Node,
    depth: u32,
) -> Result<Decision> {
    if session.has_seen(&node.id) {
        return Ok(Decision::Skip(SkipReason::Duplicate));
    }
    if !config.allows_type(&node.node_type) {
        return Ok(Decision::Skip(SkipReason::TypeFiltered));
    }
    if !config.allows_depth(depth) {
        return Ok(Decision::Skip(SkipReason::TooDeep));
    }

    let size = estimate_size(node)?;
    if session.memory_usage() + size > config.effective_budget() {
        return Ok(Decision::Skip(SkipReason::OverBudget { size }));
    }

    let mut admitted = node.clone();
    for key in &config.exclude_props {
        admitted.remove_property(key);
    }
    if config.summarize_nodes {
        admitted = summarize(admitted);
        // The summary fills in visibility; an excluded one stays out.
        if config.exclude_props.contains("visible") {
            admitted.visible = None;
        }
    }

    session.record_admission(node.id.clone(), size);
    Ok(Decision::Admit(admitted))
}
