//! Chunked pre-order walk.
//!
//! The walk is depth-first, visiting siblings in document order: the
//! document's children seed an explicit stack, and every popped node pushes
//! its own children so they come out before the node's next sibling.

use fc_domain::config::TraversalConfig;
use fc_domain::error::Result;
use fc_domain::node::{Document, Node};
use fc_domain::trace::TraceEvent;

use crate::admission::{self, Decision, SkipReason};
use crate::cursor::Cursor;
use crate::report::{HaltReason, TraversalResult, TraversalStats};
use crate::session::TraversalSession;

/// A node waiting to be visited, with its depth below the document.
#[derive(Debug, Clone, Copy)]
struct WalkEntry<'a> {
    node: &'a Node,
    depth: u32,
}

/// Explicit stack driving the pre-order walk.
struct WalkStack<'a> {
    entries: Vec<WalkEntry<'a>>,
}

impl<'a> WalkStack<'a> {
    fn seeded(document: &'a Document) -> Self {
        let mut stack = Self {
            entries: Vec::with_capacity(document.children.len()),
        };
        stack.push_children(&document.children, 0);
        stack
    }

    /// Push so the first child is popped first.
    fn push_children(&mut self, children: &'a [Node], depth: u32) {
        self.entries
            .extend(children.iter().rev().map(|node| WalkEntry { node, depth }));
    }

    fn pop(&mut self) -> Option<WalkEntry<'a>> {
        self.entries.pop()
    }

    fn push_back(&mut self, entry: WalkEntry<'a>) {
        self.entries.push(entry);
    }

    /// Queue the children of a consumed entry, unless depth gating means
    /// none of them could ever be admitted.
    fn expand(&mut self, entry: WalkEntry<'a>, config: &TraversalConfig) {
        if !entry.node.children.is_empty() && config.expands_below(entry.depth) {
            self.push_children(&entry.node.children, entry.depth + 1);
        }
    }

    /// Consume up to `steps` entries without judging them. Returns the
    /// number actually consumed, which is smaller only when the walk ends.
    fn fast_forward(&mut self, steps: usize, config: &TraversalConfig) -> usize {
        let mut consumed = 0;
        while consumed < steps {
            let Some(entry) = self.pop() else { break };
            self.expand(entry, config);
            consumed += 1;
        }
        consumed
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TraversalSession {
    /// Enumerate the next page of `document`.
    ///
    /// `cursor` is the token returned as `next_cursor` by a previous call;
    /// a token that is not a plain decimal number is rejected with
    /// `InvalidCursor`.
    pub fn traverse(
        &mut self,
        document: &Document,
        cursor: Option<&str>,
        config: &TraversalConfig,
    ) -> Result<TraversalResult> {
        let cursor = cursor.map(str::parse::<Cursor>).transpose()?;
        self.traverse_from(document, cursor.unwrap_or_default(), config)
    }

    /// Enumerate the page that starts `cursor` steps into the walk.
    ///
    /// The stack is rebuilt from the document and fast-forwarded, so the
    /// result is only a continuation of an earlier page when the document
    /// and the filter configuration are unchanged.
    pub fn traverse_from(
        &mut self,
        document: &Document,
        cursor: Cursor,
        config: &TraversalConfig,
    ) -> Result<TraversalResult> {
        let budget = config.effective_budget();
        let mut stack = WalkStack::seeded(document);
        let mut position = stack.fast_forward(cursor.position(), config);

        let mut nodes = Vec::new();
        let mut stats = TraversalStats::default();

        let halt_reason = loop {
            if nodes.len() >= config.page_size {
                break HaltReason::PageFull;
            }
            if self.memory_usage() >= budget {
                break HaltReason::BudgetExhausted;
            }
            let Some(entry) = stack.pop() else {
                break HaltReason::Drained;
            };

            match admission::evaluate(self, config, entry.node, entry.depth)? {
                Decision::Admit(node) => {
                    nodes.push(node);
                    stats.admitted += 1;
                }
                Decision::Skip(SkipReason::OverBudget { size }) => {
                    tracing::debug!(
                        node_id = %entry.node.id,
                        size,
                        memory_usage = self.memory_usage(),
                        budget,
                        "node does not fit remaining budget"
                    );
                    stack.push_back(entry);
                    break HaltReason::OverBudget;
                }
                Decision::Skip(SkipReason::Duplicate) => stats.skipped_duplicate += 1,
                Decision::Skip(SkipReason::TypeFiltered) => stats.skipped_type += 1,
                Decision::Skip(SkipReason::TooDeep) => stats.skipped_depth += 1,
            }

            stack.expand(entry, config);
            stats.visited += 1;
            position += 1;
        };
        stats.halt_reason = halt_reason;

        let has_more = !stack.is_empty();
        let next_cursor = has_more.then(|| Cursor::new(position).to_string());

        TraceEvent::TraversalCompleted {
            resumed_from: cursor.position(),
            next_position: position,
            visited: stats.visited,
            admitted: stats.admitted,
            skipped_duplicate: stats.skipped_duplicate,
            skipped_type: stats.skipped_type,
            skipped_depth: stats.skipped_depth,
            halt_reason: halt_reason.as_str().to_owned(),
            memory_usage: self.memory_usage(),
            has_more,
        }
        .emit();

        Ok(TraversalResult {
            nodes,
            memory_usage: self.memory_usage(),
            next_cursor,
            has_more,
            stats,
        })
    }
}
