use std::collections::HashSet;

/// Mutable state of one traversal instance.
///
/// Holds the ids already admitted and the running size total. Both persist
/// across every [`traverse`](TraversalSession::traverse) call on the same
/// session: a node admitted on page one is never admitted again, and the
/// budget counts everything admitted so far. Build a fresh session per
/// request for independent enumerations.
#[derive(Debug, Default)]
pub struct TraversalSession {
    seen: HashSet<String>,
    memory_usage: f64,
}

impl TraversalSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Cumulative estimated size of every admitted node, in budget units.
    pub fn memory_usage(&self) -> f64 {
        self.memory_usage
    }

    /// Number of nodes admitted over the session's lifetime.
    pub fn admitted_count(&self) -> usize {
        self.seen.len()
    }

    pub(crate) fn record_admission(&mut self, id: String, size: f64) {
        self.seen.insert(id);
        self.memory_usage += size;
    }
}
