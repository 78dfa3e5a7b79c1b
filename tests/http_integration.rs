//! End-to-end tests for `ApiClient` against a throwaway local HTTP server.
//!
//! The server echoes back what it received (path, `Authorization` header,
//! body) so tests can assert on what actually went over the wire.
//!
//! Run with:
//! ```bash
//! cargo test -p seed-admin-sdk --test http_integration
//! ```

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use seed_admin_sdk::prelude::*;

#[derive(Debug, Deserialize)]
struct Echo {
    method: String,
    path: String,
    authorization: Option<String>,
    body: Option<serde_json::Value>,
}

/// Start the echo server; it runs until the test's runtime shuts down.
async fn spawn_echo_server() -> SocketAddr {
    spawn_counting_echo_server().await.0
}

/// Echo server plus a count of the requests it has received.
async fn spawn_counting_echo_server() -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(handle(stream, counter.clone()));
        }
    });
    (addr, hits)
}

async fn handle(mut stream: TcpStream, hits: Arc<AtomicUsize>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    hits.fetch_add(1, Ordering::SeqCst);
    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split(' ');
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut authorization = None;
    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim().to_string();
            match name.to_ascii_lowercase().as_str() {
                "authorization" => authorization = Some(value),
                "content-length" => content_length = value.parse().unwrap_or(0),
                _ => {}
            }
        }
    }

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = (content_length > 0)
        .then(|| serde_json::from_slice::<serde_json::Value>(&buf[header_end..]).ok())
        .flatten();

    let (status, payload) = match path.as_str() {
        "/missing" => ("404 Not Found", "nope".to_string()),
        "/private" if authorization.is_none() => ("401 Unauthorized", String::new()),
        "/boom" => ("503 Service Unavailable", "down".to_string()),
        "/empty" => ("204 No Content", String::new()),
        _ => (
            "200 OK",
            serde_json::json!({
                "method": method,
                "path": path,
                "authorization": authorization,
                "body": body,
            })
            .to_string(),
        ),
    };

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn client(addr: SocketAddr, store: Arc<MemoryStore>) -> ApiClient {
    ApiClient::builder()
        .base_url(&format!("http://{addr}/"))
        .credentials(SessionCredentials::new(store))
        .build()
        .unwrap()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sends_bearer_token_from_session() {
    let addr = spawn_echo_server().await;
    let store = Arc::new(MemoryStore::with_item(SESSION_KEY, r#"{"token":"abc123"}"#));
    let api = client(addr, store);

    let echo: Echo = api.get("/usuarios").await.unwrap();
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/usuarios");
    assert_eq!(echo.authorization.as_deref(), Some("Bearer abc123"));
}

#[tokio::test]
async fn test_no_header_for_missing_empty_or_malformed_session() {
    let addr = spawn_echo_server().await;

    for stored in [None, Some("{}"), Some(r#"{"token":"abc"#), Some("garbage")] {
        let store = Arc::new(match stored {
            Some(raw) => MemoryStore::with_item(SESSION_KEY, raw),
            None => MemoryStore::new(),
        });
        let echo: Echo = client(addr, store).get("/usuarios").await.unwrap();
        assert_eq!(echo.authorization, None, "stored = {stored:?}");
    }
}

#[tokio::test]
async fn test_login_and_logout_take_effect_on_next_request() {
    let addr = spawn_echo_server().await;
    let store = Arc::new(MemoryStore::new());
    let api = client(addr, store.clone());

    assert!(matches!(
        api.get::<Echo>("/private").await,
        Err(HttpError::Unauthorized)
    ));

    store
        .set_item(SESSION_KEY, r#"{"token":"t-1","nome":"Ana"}"#)
        .unwrap();
    let echo: Echo = api.get("/private").await.unwrap();
    assert_eq!(echo.authorization.as_deref(), Some("Bearer t-1"));

    store.remove_item(SESSION_KEY).unwrap();
    assert!(matches!(
        api.get::<Echo>("/private").await,
        Err(HttpError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let addr = spawn_echo_server().await;
    let store = Arc::new(MemoryStore::with_item(SESSION_KEY, r#"{"token":"tok"}"#));
    let api = client(addr, store);

    let echo: Echo = api
        .post("/clientes", &serde_json::json!({"nome": "Ana", "ativo": true}))
        .await
        .unwrap();
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.authorization.as_deref(), Some("Bearer tok"));
    assert_eq!(
        echo.body,
        Some(serde_json::json!({"nome": "Ana", "ativo": true}))
    );
}

#[tokio::test]
async fn test_query_params_reach_server() {
    let addr = spawn_echo_server().await;
    let api = client(addr, Arc::new(MemoryStore::new()));

    let echo: Echo = api
        .send(OutgoingRequest::get("/clientes").query("page", 3))
        .await
        .unwrap();
    assert_eq!(echo.path, "/clientes?page=3");
}

#[tokio::test]
async fn test_response_errors_are_surfaced() {
    let addr = spawn_echo_server().await;
    let api = client(addr, Arc::new(MemoryStore::new()));

    match api.get::<Echo>("/missing").await {
        Err(HttpError::NotFound(body)) => assert_eq!(body, "nope"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    match api.get::<Echo>("/boom").await {
        Err(HttpError::ServerError { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "down");
        }
        other => panic!("expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_success_body() {
    let addr = spawn_echo_server().await;
    let api = client(addr, Arc::new(MemoryStore::new()));

    api.delete::<()>("/empty").await.unwrap();

    let raw = api.send_raw(OutgoingRequest::get("/missing")).await.unwrap();
    assert_eq!(raw.status().as_u16(), 404);
}

#[tokio::test]
async fn test_invalid_token_is_never_sent() {
    let (addr, hits) = spawn_counting_echo_server().await;
    let store = Arc::new(MemoryStore::with_item(
        SESSION_KEY,
        r#"{"token":"abc\r\nX-Evil: 1"}"#,
    ));
    let api = client(addr, store);

    assert!(matches!(
        api.get::<Echo>("/usuarios").await,
        Err(HttpError::InvalidHeader { .. })
    ));
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    // Same server still answers a well-formed request.
    let echo: Echo = client(addr, Arc::new(MemoryStore::new()))
        .get("/usuarios")
        .await
        .unwrap();
    assert_eq!(echo.authorization, None);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_client() {
    let addr = spawn_echo_server().await;
    let store = Arc::new(MemoryStore::with_item(SESSION_KEY, r#"{"token":"shared"}"#));
    let api = client(addr, store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let api = api.clone();
            tokio::spawn(async move { api.get::<Echo>(&format!("/item/{i}")).await })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let echo = handle.await.unwrap().unwrap();
        assert_eq!(echo.path, format!("/item/{i}"));
        assert_eq!(echo.authorization.as_deref(), Some("Bearer shared"));
    }
}

#[tokio::test]
async fn test_file_store_session() {
    let addr = spawn_echo_server().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .set_item(SESSION_KEY, r#"{"token":"from-disk"}"#)
        .unwrap();

    let api = ApiClient::builder()
        .config(ApiConfig::new(format!("http://{addr}")))
        .credentials(SessionCredentials::new(store))
        .build()
        .unwrap();

    let echo: Echo = api.get("/usuarios").await.unwrap();
    assert_eq!(echo.authorization.as_deref(), Some("Bearer from-disk"));
}
