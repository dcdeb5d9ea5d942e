use serde::Serialize;

/// Structured trace events emitted across all figchunk crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    UpstreamCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
        attempt: u32,
    },
    DocumentFetched {
        file_key: String,
        depth: Option<u32>,
        top_level_nodes: usize,
    },
    TraversalCompleted {
        resumed_from: usize,
        next_position: usize,
        visited: usize,
        admitted: usize,
        skipped_duplicate: usize,
        skipped_type: usize,
        skipped_depth: usize,
        halt_reason: String,
        memory_usage: f64,
        has_more: bool,
    },
    ToolCalled {
        tool: String,
        duration_ms: u64,
        is_error: bool,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "fc_event");
    }
}
