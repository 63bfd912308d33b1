//! Top-level facade crate for flashpolicy.
//!
//! Re-exports the responder core and the socket server so users can depend on a single crate.

pub mod core {
    pub use flashpolicy_core::*;
}

pub mod server {
    pub use flashpolicy_server::*;
}
