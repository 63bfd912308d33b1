use std::net::SocketAddr;

use serde::Deserialize;
use flashpolicy_core::error::{FlashPolicyError, Result};
use flashpolicy_core::PolicyResponder;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub policy: PolicySection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FlashPolicyError::UnsupportedVersion);
        }

        self.server.validate()?;
        // Site control and ports are checked here; domains when the policy is first rendered.
        self.policy.build_responder()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,

    #[serde(default = "default_max_connection_ms")]
    pub max_connection_ms: u64,

    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            idle_timeout_ms: default_idle_timeout_ms(),
            max_request_bytes: default_max_request_bytes(),
            max_connection_ms: default_max_connection_ms(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(100..=600000).contains(&self.idle_timeout_ms) {
            return Err(FlashPolicyError::BadConfig(
                "server.idle_timeout_ms must be between 100 and 600000".into(),
            ));
        }
        if !(1..=65536).contains(&self.max_request_bytes) {
            return Err(FlashPolicyError::BadConfig(
                "server.max_request_bytes must be between 1 and 65536".into(),
            ));
        }
        if !(100..=3600000).contains(&self.max_connection_ms) {
            return Err(FlashPolicyError::BadConfig(
                "server.max_connection_ms must be between 100 and 3600000".into(),
            ));
        }
        if self.max_connection_ms < self.idle_timeout_ms {
            return Err(FlashPolicyError::BadConfig(
                "server.max_connection_ms must not be less than idle_timeout_ms".into(),
            ));
        }
        if !(1..=1024).contains(&self.outbound_queue) {
            return Err(FlashPolicyError::BadConfig(
                "server.outbound_queue must be between 1 and 1024".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            FlashPolicyError::BadConfig(format!("server.listen is not a socket address: {}", self.listen))
        })
    }
}

// 843 is where Flash Player looks for a socket policy before falling back to the target port.
fn default_listen() -> String {
    "0.0.0.0:843".into()
}
fn default_idle_timeout_ms() -> u64 {
    5000
}
fn default_max_request_bytes() -> usize {
    1024
}
fn default_max_connection_ms() -> u64 {
    30000
}
fn default_outbound_queue() -> usize {
    4
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySection {
    pub site_control: String,

    #[serde(default)]
    pub allow_access: Vec<AccessEntry>,
}

impl PolicySection {
    pub fn build_responder(&self) -> Result<PolicyResponder> {
        let mut responder = PolicyResponder::new();
        responder.set_site_control(&self.site_control)?;
        for entry in &self.allow_access {
            responder.add_allowed_access(entry.domain.as_str(), entry.ports.as_str())?;
        }
        Ok(responder)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessEntry {
    pub domain: String,
    #[serde(default = "default_ports")]
    pub ports: String,
}

fn default_ports() -> String {
    "*".into()
}
