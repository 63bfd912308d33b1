//! Socket-backed [`Connection`].
//!
//! The responder's callbacks are synchronous, so `send`/`close` only enqueue
//! work; a writer task owns the socket's write half and drains the queue.
//!
//! The queue is bounded. A peer that keeps sending without reading fills it,
//! and the connection is closed instead of buffering more responses.

use std::net::SocketAddr;

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{self, error::TrySendError};

use flashpolicy_core::Connection;

/// Work item for the socket writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Data(Bytes),
    /// Flush and shut down the write half.
    End,
}

#[derive(Debug)]
pub struct IoConnection {
    peer: SocketAddr,
    out_tx: mpsc::Sender<Outbound>,
    closed: bool,
    overflowed: bool,
}

impl IoConnection {
    pub fn new(peer: SocketAddr, out_tx: mpsc::Sender<Outbound>) -> Self {
        Self { peer, out_tx, closed: false, overflowed: false }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// True when the connection was closed because the peer stopped reading.
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }
}

impl Connection for IoConnection {
    fn send(&mut self, data: Bytes) -> &mut Self {
        if self.closed {
            tracing::debug!(peer = %self.peer, "send after close dropped");
            return self;
        }
        match self.out_tx.try_send(Outbound::Data(data)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::debug!(peer = %self.peer, "outbound queue full, closing");
                self.overflowed = true;
                self.close();
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(peer = %self.peer, "writer gone, send dropped");
            }
        }
        self
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.out_tx.try_send(Outbound::End).is_err() {
            tracing::debug!(peer = %self.peer, "writer gone or stalled, end dropped");
        }
    }
}

/// Drain `out_rx` into `wr` until `End`, a write error, or every sender is dropped.
pub async fn run_writer<W>(mut wr: W, mut out_rx: mpsc::Receiver<Outbound>, peer: SocketAddr)
where
    W: AsyncWrite + Unpin,
{
    while let Some(out) = out_rx.recv().await {
        match out {
            Outbound::Data(b) => {
                if let Err(e) = wr.write_all(&b).await {
                    tracing::debug!(%peer, err = %e, "write failed");
                    return;
                }
            }
            Outbound::End => break,
        }
    }
    if let Err(e) = wr.shutdown().await {
        tracing::debug!(%peer, err = %e, "shutdown failed");
    }
}
