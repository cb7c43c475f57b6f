#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Canned-response pipeline server for integration tests.
///
/// Serves one scripted `(status, body)` pair per connection and records every
/// request body so tests can assert on what the client actually sent. Responses
/// carry `Connection: close` so the client opens a fresh connection per call,
/// keeping the scripted ordering deterministic.
pub struct MockPipelineServer {
    pub base_url: String,
    bodies: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl MockPipelineServer {
    pub async fn spawn(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let recorded = bodies.clone();

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut sock, _)) = listener.accept().await else {
                    return;
                };
                let request_body = read_request_body(&mut sock).await;
                if let Ok(json) = serde_json::from_str::<serde_json::Value>(&request_body) {
                    recorded.lock().unwrap().push(json);
                }

                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = sock.write_all(response.as_bytes()).await;
                let _ = sock.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            bodies,
        }
    }

    /// Request bodies received so far, in order.
    pub fn request_bodies(&self) -> Vec<serde_json::Value> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn read_request_body(sock: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];

    let header_end = loop {
        let n = sock.read(&mut tmp).await.unwrap();
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        if n == 0 {
            return String::new();
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = sock.read(&mut tmp).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
    }

    let end = (header_end + content_length).min(buf.len());
    String::from_utf8_lossy(&buf[header_end..end]).to_string()
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// A successful two-step (`execute` + `close`) response wrapping `result`.
pub fn ok_body(result: serde_json::Value) -> String {
    serde_json::json!({
        "baton": null,
        "results": [
            {"type": "ok", "response": {"type": "execute", "result": result}},
            {"type": "ok", "response": {"type": "close"}}
        ]
    })
    .to_string()
}

/// The canned answer to the adapter's `SELECT 1` connection check.
pub fn select_one_body() -> String {
    ok_body(serde_json::json!({
        "cols": [{"name": "1"}],
        "rows": [[{"type": "integer", "value": "1"}]],
        "affected_row_count": 0,
        "last_insert_rowid": null
    }))
}

/// A result payload with no columns or rows, as DDL statements produce.
pub fn empty_result_body() -> String {
    ok_body(serde_json::json!({
        "cols": [],
        "rows": [],
        "affected_row_count": 0,
        "last_insert_rowid": null
    }))
}
