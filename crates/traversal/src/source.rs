//! Upstream document collaborator.

use std::collections::HashMap;

use async_trait::async_trait;
use fc_domain::error::{Error, Result};
use fc_domain::node::Document;

/// Supplies the full node tree of a file.
///
/// `depth` bounds how many levels below the document the source needs to
/// materialize (`None` means the whole tree). Implementations own retries
/// and authentication; a missing document root must surface as
/// `InvalidUpstreamData`, an unreachable source as `UpstreamUnavailable`.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self, file_key: &str, depth: Option<u32>) -> Result<Document>;
}

/// A source backed by documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<String, Document>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, file_key: impl Into<String>, document: Document) -> Self {
        self.documents.insert(file_key.into(), document);
        self
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    async fn fetch_document(&self, file_key: &str, _depth: Option<u32>) -> Result<Document> {
        self.documents
            .get(file_key)
            .cloned()
            .ok_or_else(|| Error::UpstreamUnavailable {
                status: Some(404),
                message: format!("file {file_key} not found"),
            })
    }
}
