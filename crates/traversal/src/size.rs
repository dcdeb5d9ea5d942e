//! Node size estimate used for budget accounting.

use fc_domain::error::Result;
use fc_domain::node::Node;

/// Bytes per budget unit (budgets are configured in MiB).
pub const BYTES_PER_UNIT: f64 = 1024.0 * 1024.0;

/// Estimated size of `node`, in budget units.
///
/// Byte length of the node's JSON encoding. Fields serialize in
/// declaration order and properties are key-ordered, so the same node
/// always yields the same estimate.
pub fn estimate_size(node: &Node) -> Result<f64> {
    Ok(encoded_len(node)? as f64 / BYTES_PER_UNIT)
}

/// Byte length of the node's JSON encoding.
pub fn encoded_len(node: &Node) -> Result<usize> {
    Ok(serde_json::to_vec(node)?.len())
}
