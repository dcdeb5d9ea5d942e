//! Integration test: boots an in-process axum upstream that plays back
//! canned responses, points a real [`RestFigmaClient`] at it, and checks
//! request shape, retry behavior and error mapping.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use fc_domain::config::FigmaConfig;
use fc_domain::error::Error;
use fc_domain::node::NodeType;
use fc_figma::RestFigmaClient;
use fc_traversal::DocumentSource;
use tokio::net::TcpListener;

// ── Mini upstream ───────────────────────────────────────────────────────

struct Canned {
    status: u16,
    body: String,
}

impl Canned {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A request as the upstream saw it.
#[derive(Debug, Clone)]
struct Seen {
    uri: String,
    headers: HeaderMap,
}

#[derive(Clone, Default)]
struct Upstream {
    responses: Arc<Mutex<VecDeque<Canned>>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

async fn replay(State(upstream): State<Upstream>, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
    upstream.seen.lock().unwrap().push(Seen {
        uri: uri.to_string(),
        headers,
    });
    let canned = upstream
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Canned::new(500, "no canned response left"));
    let status = StatusCode::from_u16(canned.status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], canned.body)
}

/// Serves `responses` in order, one per request, and records every
/// request it receives.
async fn start_upstream(responses: Vec<Canned>) -> (SocketAddr, Arc<Mutex<Vec<Seen>>>) {
    let upstream = Upstream {
        responses: Arc::new(Mutex::new(responses.into())),
        ..Default::default()
    };
    let seen = upstream.seen.clone();
    let app = Router::new().fallback(replay).with_state(upstream);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, seen)
}

fn client_for(addr: SocketAddr, max_retries: u32) -> RestFigmaClient {
    let cfg = FigmaConfig {
        base_url: format!("http://{addr}"),
        token_env: "FC_TEST_TOKEN_THAT_IS_NEVER_SET".into(),
        timeout_ms: 5_000,
        max_retries,
    };
    RestFigmaClient::new(&cfg).unwrap().with_token("secret-token")
}

/// A file whose only page holds a chain of `levels` nested frames.
fn deep_file_body(levels: usize) -> String {
    let mut body = String::from(r#"{"name":"Deep","document":{"id":"0:0","type":"DOCUMENT","children":["#);
    for level in 0..levels {
        body.push_str(&format!(r#"{{"id":"{level}:1","type":"FRAME","name":"L{level}","children":["#));
    }
    body.push_str(&"]}".repeat(levels));
    body.push_str("]}}");
    body
}

const FILE_BODY: &str = r#"{
    "name": "Landing",
    "lastModified": "2024-05-01T12:00:00Z",
    "version": "42",
    "document": {
        "id": "0:0",
        "name": "Document",
        "type": "DOCUMENT",
        "children": [
            { "id": "0:1", "name": "Page 1", "type": "CANVAS", "children": [
                { "id": "1:2", "name": "Hero", "type": "FRAME" }
            ] }
        ]
    }
}"#;

// ── Tests ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetches_document_with_token_and_depth() {
    let (addr, seen) = start_upstream(vec![Canned::new(200, FILE_BODY)]).await;
    let client = client_for(addr, 0);

    let document = client.fetch_document("abc123", Some(2)).await.unwrap();
    assert_eq!(document.children.len(), 1);
    assert_eq!(document.children[0].node_type, NodeType::Canvas);
    assert_eq!(document.children[0].children[0].id, "1:2");

    let requests = seen.lock().unwrap();
    assert_eq!(requests[0].uri, "/v1/files/abc123?depth=2");
    assert_eq!(requests[0].headers["x-figma-token"], "secret-token");
    assert!(requests[0].headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn retries_server_errors_then_succeeds() {
    let (addr, seen) = start_upstream(vec![
        Canned::new(503, "{}"),
        Canned::new(502, "{}"),
        Canned::new(200, FILE_BODY),
    ])
    .await;
    let client = client_for(addr, 3);

    let document = client.fetch_document("abc123", None).await.unwrap();
    assert_eq!(document.children[0].id, "0:1");
    assert_eq!(seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn exhausted_retries_surface_last_status() {
    let (addr, _) = start_upstream(vec![
        Canned::new(500, "boom"),
        Canned::new(500, "boom"),
    ])
    .await;
    let client = client_for(addr, 1);

    let err = client.fetch_document("abc123", None).await.unwrap_err();
    match err {
        Error::UpstreamUnavailable { status, message } => {
            assert_eq!(status, Some(500));
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn auth_failures_are_not_retried() {
    let (addr, seen) = start_upstream(vec![
        Canned::new(403, r#"{"status":403,"err":"Invalid token"}"#),
        Canned::new(200, FILE_BODY),
    ])
    .await;
    let client = client_for(addr, 3);

    let err = client.fetch_document("abc123", None).await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn not_found_is_upstream_unavailable() {
    let (addr, _) = start_upstream(vec![Canned::new(404, r#"{"err":"Not found"}"#)]).await;
    let client = client_for(addr, 3);

    let err = client.fetch_document("missing", None).await.unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable { status: Some(404), .. }));
}

#[tokio::test]
async fn missing_document_root_is_invalid_upstream_data() {
    let (addr, _) = start_upstream(vec![Canned::new(200, r#"{"name":"Broken"}"#)]).await;
    let client = client_for(addr, 0);

    let err = client.fetch_document("abc123", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidUpstreamData(_)));
}

#[tokio::test]
async fn garbage_body_is_invalid_upstream_data() {
    let (addr, _) = start_upstream(vec![Canned::new(200, "<html>")]).await;
    let client = client_for(addr, 0);

    let err = client.fetch_document("abc123", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidUpstreamData(_)));
}

#[tokio::test]
async fn unreachable_upstream_is_upstream_unavailable() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = client_for(addr, 0);

    let err = client.fetch_document("abc123", None).await.unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable { status: None, .. }));
}

#[tokio::test]
async fn file_key_is_sent_as_one_path_segment() {
    let (addr, seen) = start_upstream(vec![Canned::new(200, FILE_BODY)]).await;
    let client = client_for(addr, 0);

    client.fetch_document("abc?depth=999#x", None).await.unwrap();
    assert_eq!(seen.lock().unwrap()[0].uri, "/v1/files/abc%3Fdepth=999%23x");
}

#[tokio::test]
async fn trees_deeper_than_the_default_parser_limit_load() {
    let levels = 80;
    let (addr, _) = start_upstream(vec![Canned::new(200, deep_file_body(levels))]).await;
    let client = client_for(addr, 0);

    let document = client.fetch_document("deep", None).await.unwrap();
    let mut node = &document.children[0];
    let mut seen_levels = 1;
    while let Some(child) = node.children.first() {
        node = child;
        seen_levels += 1;
    }
    assert_eq!(seen_levels, levels);
    assert_eq!(node.id, format!("{}:1", levels - 1));
}
