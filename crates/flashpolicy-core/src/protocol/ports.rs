//! `to-ports` spec validation: `*`, or a comma list of `N` / `A-B` tokens.

pub const ALL_PORTS: &str = "*";

pub fn validate_ports(value: &str) -> bool {
    value == ALL_PORTS || value.split(',').all(is_port_token)
}

fn is_port_token(token: &str) -> bool {
    match token.split_once('-') {
        Some((lo, hi)) => is_digits(lo) && is_digits(hi),
        None => is_digits(token),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
