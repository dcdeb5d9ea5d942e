//! Fetch-once-then-walk entry point.

use std::time::Instant;

use fc_domain::config::TraversalConfig;
use fc_domain::error::Result;
use fc_domain::trace::TraceEvent;

use crate::cursor::Cursor;
use crate::report::TraversalResult;
use crate::session::TraversalSession;
use crate::source::DocumentSource;

/// Reads a file page by page through a [`DocumentSource`].
///
/// Every call fetches the document once and walks the fetched snapshot.
/// Resuming with a cursor relies on the source returning the same tree for
/// the same file key and depth.
pub struct ChunkedReader<S> {
    source: S,
}

impl<S: DocumentSource> ChunkedReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Read one page with a fresh session.
    pub async fn read(
        &self,
        file_key: &str,
        cursor: Option<&str>,
        config: &TraversalConfig,
    ) -> Result<TraversalResult> {
        let mut session = TraversalSession::new();
        self.read_with(&mut session, file_key, cursor, config).await
    }

    /// Read one page, accounting against an existing session.
    pub async fn read_with(
        &self,
        session: &mut TraversalSession,
        file_key: &str,
        cursor: Option<&str>,
        config: &TraversalConfig,
    ) -> Result<TraversalResult> {
        // A bad token should not cost an upstream round-trip.
        let cursor = cursor.map(str::parse::<Cursor>).transpose()?;

        let depth = config.fetch_depth();
        let start = Instant::now();
        let document = self.source.fetch_document(file_key, depth).await?;

        TraceEvent::DocumentFetched {
            file_key: file_key.to_owned(),
            depth,
            top_level_nodes: document.children.len(),
        }
        .emit();

        let result = session.traverse_from(&document, cursor.unwrap_or_default(), config)?;
        tracing::info!(
            file_key,
            nodes = result.nodes.len(),
            has_more = result.has_more,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "chunk read"
        );
        Ok(result)
    }
}
