//! Shared error type across flashpolicy crates.

use thiserror::Error;

/// Stable error categories (surfaced in logs and by callers that need to branch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The policy, or the file it was loaded from, is not servable.
    Configuration,
    /// Socket-level failure.
    Io,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::Io => "IO",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FlashPolicyError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum FlashPolicyError {
    #[error("invalid site control: {0:?}")]
    InvalidSiteControl(String),
    #[error("invalid port spec: {0:?}")]
    InvalidPorts(String),
    #[error("invalid domain: {0:?}")]
    InvalidDomain(String),
    #[error("site control has not been set")]
    MissingSiteControl,
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl FlashPolicyError {
    /// Map the error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlashPolicyError::InvalidSiteControl(_)
            | FlashPolicyError::InvalidPorts(_)
            | FlashPolicyError::InvalidDomain(_)
            | FlashPolicyError::MissingSiteControl
            | FlashPolicyError::BadConfig(_)
            | FlashPolicyError::UnsupportedVersion => ErrorKind::Configuration,
            FlashPolicyError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}
