//! flashpolicy server library entry.
//!
//! Wires config, the policy responder and the TCP transport into a standalone
//! socket-policy server. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod transport;
