//! Newline-delimited JSON-RPC loop.
//!
//! Requests are handled one at a time in arrival order; each tool call
//! gets its own traversal session.

use std::time::Instant;

use fc_domain::config::{Config, TraversalConfig};
use fc_domain::trace::TraceEvent;
use fc_traversal::{ChunkedReader, DocumentSource};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::protocol::{
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerInfo, ToolCallContent,
    ToolCallParams, ToolCallResult, ToolsListResult, INVALID_REQUEST, JSONRPC_VERSION,
    PARSE_ERROR, PROTOCOL_VERSION,
};
use crate::tools::{self, CHUNKED_NODES_TOOL};

pub struct McpServer<S> {
    reader: ChunkedReader<S>,
    defaults: TraversalConfig,
    name: String,
}

impl<S: DocumentSource> McpServer<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            reader: ChunkedReader::new(source),
            defaults: config.traversal.clone(),
            name: config.server.name.clone(),
        }
    }

    /// Serve until `input` reaches EOF.
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut encoded = serde_json::to_vec(&response)?;
                encoded.push(b'\n');
                output.write_all(&encoded).await?;
                output.flush().await?;
            }
        }
        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "unparseable message");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("parse error: {e}")),
                ));
            }
        };
        let id = raw.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(req) => req,
            Err(e) => {
                tracing::debug!(error = %e, "malformed request");
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(INVALID_REQUEST, format!("invalid request: {e}")),
                ));
            }
        };
        self.handle_request(request).await
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(tools_list()),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self) -> Value {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.into(),
            capabilities: json!({ "tools": {} }),
            server_info: ServerInfo {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
        };
        serde_json::to_value(result).unwrap_or_default()
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ToolCallParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| JsonRpcError::invalid_params(format!("invalid tools/call params: {e}")))?;

        if params.name != CHUNKED_NODES_TOOL {
            return Err(JsonRpcError::invalid_params(format!(
                "unknown tool: {}",
                params.name
            )));
        }

        let start = Instant::now();
        let outcome = tools::call_chunked_nodes(&self.reader, &self.defaults, params.arguments).await;

        TraceEvent::ToolCalled {
            tool: params.name.clone(),
            duration_ms: start.elapsed().as_millis() as u64,
            is_error: outcome.is_err(),
        }
        .emit();

        let page = outcome.map_err(|e| {
            if e.is_client_error() {
                tracing::debug!(error = %e, "tool call rejected");
            } else {
                tracing::warn!(error = %e, "tool call failed");
            }
            JsonRpcError::from(e)
        })?;
        let text = serde_json::to_string(&page)
            .map_err(|e| JsonRpcError::from(fc_domain::error::Error::from(e)))?;

        let result = ToolCallResult {
            content: vec![ToolCallContent::text(text)],
            is_error: false,
        };
        serde_json::to_value(result)
            .map_err(|e| JsonRpcError::from(fc_domain::error::Error::from(e)))
    }
}

fn tools_list() -> Value {
    let result = ToolsListResult {
        tools: vec![tools::chunked_nodes_tool()],
    };
    serde_json::to_value(result).unwrap_or_default()
}
