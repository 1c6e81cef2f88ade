//! Error types shared across the crate.
//!
//! Most failure handling in stackpatrol is value-encoded by contract: command
//! failures become `CommandOutcome { ok: false, .. }`, unparseable compose
//! files become a sentinel entry, and health inspection problems degrade to a
//! non-healthy verdict. `PatrolError` covers the remaining genuinely fallible
//! seams, such as webhook delivery.

use thiserror::Error;

pub type PatrolResult<T> = Result<T, PatrolError>;

#[derive(Debug, Error)]
pub enum PatrolError {
    /// Compose file could not be read or parsed as YAML.
    #[error("compose parse error: {0}")]
    Compose(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Webhook delivery failed (connection, non-2xx response).
    #[error("notification delivery failed: {0}")]
    Notify(String),
}
