//! Accept loop and per-connection event pump.
//!
//! Per connection:
//! - `on_open` once
//! - every non-empty read → `on_message`
//! - EOF → `on_close`
//! - read error / idle timeout / lifetime cap → `on_error` (closes)
//!
//! The loop ends as soon as the connection is closed from either side. A
//! writer still stuck on a peer that does not read is aborted after one more
//! idle period.

use std::io;
use std::net::SocketAddr;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{timeout, timeout_at, Duration, Instant};

use flashpolicy_core::error::Result;
use flashpolicy_core::{Connection, ConnectionHandler};

use crate::app_state::AppState;
use crate::transport::io_connection::{run_writer, IoConnection};

/// Bind the configured address and serve until the listener fails.
pub async fn serve(app: AppState) -> Result<()> {
    let listen = app.cfg().server.listen_addr()?;
    let listener = TcpListener::bind(listen).await?;
    tracing::info!(%listen, "flashpolicy-server listening");
    serve_on(listener, app).await
}

/// Serve on an already-bound listener.
pub async fn serve_on(listener: TcpListener, app: AppState) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let app = app.clone();
        tokio::spawn(async move {
            handle_connection(stream, peer, app).await;
        });
    }
}

async fn handle_connection(stream: TcpStream, peer: SocketAddr, app: AppState) {
    let responder = app.responder();
    let server = &app.cfg().server;
    let idle_timeout = Duration::from_millis(server.idle_timeout_ms);
    let deadline = Instant::now() + Duration::from_millis(server.max_connection_ms);

    let (mut rd, wr) = stream.into_split();
    let (out_tx, out_rx) = mpsc::channel(server.outbound_queue);
    let mut writer = tokio::spawn(run_writer(wr, out_rx, peer));

    let mut conn = IoConnection::new(peer, out_tx);
    let mut buf = vec![0u8; server.max_request_bytes];

    tracing::debug!(%peer, "connection opened");
    responder.on_open(&mut conn);

    while !conn.is_closed() {
        let read = timeout_at(deadline, timeout(idle_timeout, rd.read(&mut buf))).await;
        let Ok(read) = read else {
            let e = io::Error::new(io::ErrorKind::TimedOut, "connection lifetime exceeded");
            tracing::debug!(%peer, "lifetime exceeded");
            responder.on_error(&mut conn, &e);
            break;
        };
        match read {
            Ok(Ok(0)) => {
                responder.on_close(&mut conn);
                break;
            }
            Ok(Ok(n)) => {
                if let Err(e) = responder.on_message(&mut conn, &buf[..n]) {
                    tracing::error!(%peer, kind = e.kind().as_str(), err = %e, "policy unavailable");
                    conn.close();
                }
            }
            Ok(Err(e)) => {
                tracing::debug!(%peer, err = %e, "read failed");
                responder.on_error(&mut conn, &e);
            }
            Err(_) => {
                let e = io::Error::new(io::ErrorKind::TimedOut, "idle timeout");
                tracing::debug!(%peer, "idle timeout");
                responder.on_error(&mut conn, &e);
            }
        }
    }

    if conn.is_overflowed() {
        tracing::warn!(%peer, "peer stopped reading");
    }

    // Dropping the last sender lets the writer flush and exit.
    drop(conn);
    match timeout(idle_timeout, &mut writer).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(%peer, err = %e, "writer task failed"),
        Err(_) => {
            tracing::debug!(%peer, "writer stalled, aborting");
            writer.abort();
        }
    }
    tracing::debug!(%peer, "connection finished");
}
