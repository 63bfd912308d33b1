//! Connection capability and lifecycle callbacks.
//!
//! The responder never touches a socket directly: the transport layer hands it
//! anything that can `send` bytes and `close`, and drives it through
//! [`ConnectionHandler`].

use std::error::Error as StdError;

use bytes::Bytes;

use crate::error::Result;

/// What the responder needs from a transport connection.
pub trait Connection {
    /// Queue raw bytes for the peer. Returns `self` so writes can be chained.
    fn send(&mut self, data: Bytes) -> &mut Self;

    /// Terminate the connection. Repeated calls are harmless.
    fn close(&mut self);
}

/// Event surface invoked by the transport, once per event.
///
/// Dispatch contract: `on_open` once per connection, `on_message` zero or more
/// times, `on_close` at most once, `on_error` on transport failure.
pub trait ConnectionHandler {
    fn on_open<C: Connection>(&self, conn: &mut C);

    fn on_message<C: Connection>(&self, conn: &mut C, data: &[u8]) -> Result<()>;

    fn on_close<C: Connection>(&self, conn: &mut C);

    fn on_error<C: Connection>(&self, conn: &mut C, err: &(dyn StdError + 'static));
}
