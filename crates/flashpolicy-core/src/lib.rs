//! flashpolicy core: the Flash cross-domain socket policy responder.
//!
//! This crate owns policy validation (site control, domain patterns, port
//! specs), rendering of the `cross-domain-policy` XML document, and the
//! connection lifecycle callbacks. It carries no transport or runtime
//! dependencies; any type implementing [`Connection`] can be served.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `FlashPolicyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod connection;
pub mod error;
pub mod protocol;
pub mod responder;

pub use connection::{Connection, ConnectionHandler};
/// Shared result type.
pub use error::{ErrorKind, FlashPolicyError, Result};
pub use protocol::document::{AccessGrant, PolicyDocument};
pub use protocol::domain::validate_domain;
pub use protocol::ports::validate_ports;
pub use protocol::site_control::{validate_site_control, SiteControl};
pub use responder::PolicyResponder;
