//! Cross-domain policy grammar and document format.
//!
//! - `site_control`: the `permitted-cross-domain-policies` directive.
//! - `domain` / `ports`: validation of `allow-access-from` attributes.
//! - `document`: the rendered `cross-domain-policy` XML.
//!
//! Validators are pure predicates over `&str`; they never index raw bytes or
//! panic, so hostile configuration is reported instead of crashing the host.

pub mod document;
pub mod domain;
pub mod ports;
pub mod site_control;
