//! Transport layer (raw TCP).
//!
//! Exposes the socket-backed `Connection` and the accept loop that feeds
//! connection events into the policy responder.

pub mod io_connection;
pub mod listener;

pub use io_connection::{IoConnection, Outbound};
