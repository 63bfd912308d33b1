//! Shared application state for the policy server.
//!
//! Holds the loaded config and one responder per listener. Startup errors are
//! explicit (Result instead of panic).

use std::sync::Arc;

use flashpolicy_core::error::Result;
use flashpolicy_core::PolicyResponder;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    responder: Arc<PolicyResponder>,
}

impl AppState {
    /// Build the responder from config and render it once, so a policy that
    /// cannot be served fails here rather than on the first client.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let responder = cfg.policy.build_responder()?;
        let payload = responder.wire_payload()?;
        tracing::info!(
            site_control = %cfg.policy.site_control,
            grants = responder.grants().len(),
            bytes = payload.len(),
            "policy loaded"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, responder: Arc::new(responder) }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn responder(&self) -> Arc<PolicyResponder> {
        Arc::clone(&self.inner.responder)
    }
}
