//! `allow-access-from domain` pattern validation.
//!
//! Accepted shapes:
//! - `*` on its own
//! - dot-separated labels of `[A-Za-z0-9-]`, optionally behind `http://` or
//!   `https://` (covers `localhost` and dotted IPv4 literals too)
//! - the same with a single leading `*` label: `*.example.com`
//!
//! A `*` anywhere else (inside a label, as a trailing label, or a second time)
//! rejects the whole pattern.

pub const WILDCARD: &str = "*";

const SCHEMES: [&str; 2] = ["http://", "https://"];

pub fn validate_domain(value: &str) -> bool {
    if value == WILDCARD {
        return true;
    }

    let host = SCHEMES
        .iter()
        .find_map(|scheme| value.strip_prefix(scheme))
        .unwrap_or(value);

    let host = match host.strip_prefix("*.") {
        Some(rest) => rest,
        None => host,
    };

    !host.is_empty() && host.split('.').all(is_label)
}

fn is_label(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
