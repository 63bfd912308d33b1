//! flashpolicy-server
//!
//! Answers Flash socket-policy requests with the configured
//! `cross-domain-policy` document.
//!
//! Usage: `flashpolicy-server [config.yaml]` (default `flashpolicy.yaml`).

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use flashpolicy_server::{app_state, config, transport};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "flashpolicy.yaml".to_string());

    let result = async {
        let cfg = config::load_from_file(&path)?;
        let state = app_state::AppState::new(cfg)?;
        transport::listener::serve(state).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(config = %path, kind = e.kind().as_str(), err = %e, "flashpolicy-server failed");
            ExitCode::FAILURE
        }
    }
}
