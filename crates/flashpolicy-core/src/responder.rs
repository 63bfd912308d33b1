//! Policy responder: configuration, rendering, and the connection callbacks.
//!
//! Construct one per listening endpoint, configure it, then share it (e.g. via
//! `Arc`) with whatever dispatches connection events. Mutation needs `&mut`,
//! so configuration happens before serving; rendering is a read of current
//! state.
//!
//! Ports are checked when a grant is added. Domains are checked when the
//! document is rendered, so a bad domain only surfaces on the first render.

use std::error::Error as StdError;
use std::sync::OnceLock;

use bytes::Bytes;

use crate::connection::{Connection, ConnectionHandler};
use crate::error::{FlashPolicyError, Result};
use crate::protocol::document::{AccessGrant, PolicyDocument};
use crate::protocol::domain::validate_domain;
use crate::protocol::ports::validate_ports;
use crate::protocol::site_control::{validate_site_control, SiteControl};

#[derive(Debug, Default)]
pub struct PolicyResponder {
    site_control: Option<SiteControl>,
    grants: Vec<AccessGrant>,
    // Wire payload of the last successful render; reset by every mutation.
    cache: OnceLock<Bytes>,
}

impl PolicyResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `permitted-cross-domain-policies` value, replacing any previous one.
    /// An invalid value leaves the current setting untouched.
    pub fn set_site_control(&mut self, value: &str) -> Result<()> {
        let sc: SiteControl = value.parse()?;
        self.site_control = Some(sc);
        self.cache = OnceLock::new();
        Ok(())
    }

    /// Append an `allow-access-from` grant. Rejects (and stores nothing) when
    /// `ports` is not a valid port spec.
    pub fn add_allowed_access(
        &mut self,
        domain: impl Into<String>,
        ports: impl Into<String>,
    ) -> Result<&mut Self> {
        let ports = ports.into();
        if !validate_ports(&ports) {
            return Err(FlashPolicyError::InvalidPorts(ports));
        }
        self.grants.push(AccessGrant { domain: domain.into(), ports });
        self.cache = OnceLock::new();
        Ok(self)
    }

    pub fn site_control(&self) -> Option<SiteControl> {
        self.site_control
    }

    pub fn grants(&self) -> &[AccessGrant] {
        &self.grants
    }

    pub fn validate_site_control(&self, value: &str) -> bool {
        validate_site_control(value)
    }

    pub fn validate_domain(&self, value: &str) -> bool {
        validate_domain(value)
    }

    pub fn validate_ports(&self, value: &str) -> bool {
        validate_ports(value)
    }

    /// Build the policy document from current state.
    ///
    /// Fails when no site control is set or any stored grant has a domain that
    /// does not pass domain validation.
    pub fn render_policy(&self) -> Result<PolicyDocument> {
        let site_control = self.site_control.ok_or(FlashPolicyError::MissingSiteControl)?;

        if let Some(bad) = self.grants.iter().find(|g| !validate_domain(&g.domain)) {
            return Err(FlashPolicyError::InvalidDomain(bad.domain.clone()));
        }

        Ok(PolicyDocument { site_control, grants: self.grants.clone() })
    }

    /// Serialized response, rendered on first use.
    pub fn wire_payload(&self) -> Result<Bytes> {
        if let Some(cached) = self.cache.get() {
            return Ok(cached.clone());
        }
        let wire = self.render_policy()?.to_wire();
        tracing::debug!(bytes = wire.len(), grants = self.grants.len(), "policy rendered");
        // A concurrent render may have won the race; both payloads are identical.
        let _ = self.cache.set(wire.clone());
        Ok(wire)
    }
}

impl ConnectionHandler for PolicyResponder {
    fn on_open<C: Connection>(&self, _conn: &mut C) {}

    /// Any inbound bytes get the policy. The peer is expected to hang up.
    fn on_message<C: Connection>(&self, conn: &mut C, _data: &[u8]) -> Result<()> {
        let payload = self.wire_payload()?;
        conn.send(payload);
        Ok(())
    }

    fn on_close<C: Connection>(&self, _conn: &mut C) {}

    fn on_error<C: Connection>(&self, conn: &mut C, err: &(dyn StdError + 'static)) {
        tracing::debug!(err = %err, "closing connection after transport error");
        conn.close();
    }
}
