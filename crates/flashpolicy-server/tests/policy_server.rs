//! End-to-end: a real TCP client against the policy listener.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{timeout, Duration, Instant};

use flashpolicy_server::{app_state::AppState, config, transport::listener};

const CONFIG: &str = r#"
version: 1
server:
  listen: "127.0.0.1:0"
  idle_timeout_ms: 300
policy:
  site_control: "master-only"
  allow_access:
    - domain: "example.com"
      ports: "80,443"
    - domain: "*.example.com"
"#;

const CHATTY_CONFIG: &str = r#"
version: 1
server:
  listen: "127.0.0.1:0"
  idle_timeout_ms: 300
  max_connection_ms: 1000
  outbound_queue: 2
policy:
  site_control: "all"
  allow_access:
    - domain: "*"
"#;

async fn start() -> std::net::SocketAddr {
    start_with(CONFIG).await
}

async fn start_with(yaml: &str) -> std::net::SocketAddr {
    let cfg = config::load_from_str(yaml).unwrap();
    let state = AppState::new(cfg).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(listener::serve_on(listener, state));
    addr
}

/// Read until the NUL terminator.
async fn read_policy(stream: &mut TcpStream) -> String {
    let mut out = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        let n = timeout(Duration::from_secs(5), stream.read(&mut byte)).await.unwrap().unwrap();
        assert_eq!(n, 1, "connection ended before terminator");
        if byte[0] == 0 {
            break;
        }
        out.push(byte[0]);
    }
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn policy_request_gets_document() {
    let addr = start().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(b"<policy-file-request/>\0").await.unwrap();
    let xml = read_policy(&mut stream).await;

    assert!(xml.starts_with(r#"<?xml version="1.0"?>"#));
    assert!(xml.contains(r#"<site-control permitted-cross-domain-policies="master-only"/>"#));
    assert!(xml.contains(r#"<allow-access-from domain="example.com" to-ports="80,443" secure="false"/>"#));
    assert!(xml.contains(r#"<allow-access-from domain="*.example.com" to-ports="*" secure="false"/>"#));
    assert!(xml.ends_with("</cross-domain-policy>"));
}

#[tokio::test]
async fn any_bytes_trigger_response() {
    let addr = start().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(b" ").await.unwrap();
    let xml = read_policy(&mut stream).await;

    assert!(xml.contains("<cross-domain-policy>"));
}

#[tokio::test]
async fn silent_client_is_closed_after_idle_timeout() {
    let addr = start().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut buf = [0u8; 16];
    let n = timeout(Duration::from_secs(5), stream.read(&mut buf)).await.unwrap().unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn client_that_never_reads_is_closed() {
    let addr = start_with(CHATTY_CONFIG).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    // Keep the idle timer busy and never read a response.
    let started = Instant::now();
    let mut writes = 0usize;
    let closed = loop {
        if started.elapsed() > Duration::from_secs(5) {
            break false;
        }
        if stream.write_all(b" ").await.is_err() {
            break true;
        }
        writes += 1;
        tokio::time::sleep(Duration::from_millis(1)).await;
    };

    assert!(closed, "server kept the connection open after {writes} writes");
}
