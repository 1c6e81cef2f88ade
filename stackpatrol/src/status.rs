//! Status records accumulated over one run.

use std::fmt;
use std::path::PathBuf;

/// Outcome of the post-restart health poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthVerdict {
    /// Every container running, every configured probe healthy.
    Healthy,
    /// A container in a terminal bad state, an unhealthy probe, or an
    /// inspection that kept failing until the deadline.
    Unhealthy,
    /// Containers still starting when the poll deadline expired.
    TimedOut,
}

impl fmt::Display for HealthVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthVerdict::Healthy => write!(f, "healthy"),
            HealthVerdict::Unhealthy => write!(f, "unhealthy"),
            HealthVerdict::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Per-stack record. Created when processing of a stack begins; once `error`
/// is set, all later step fields keep their unattempted defaults.
#[derive(Debug, Clone)]
pub struct StackStatus {
    /// Directory containing the stack definition.
    pub folder: PathBuf,
    pub pulled: bool,
    pub downed: bool,
    pub upped: bool,
    /// None when the health check was never reached.
    pub health: Option<HealthVerdict>,
    /// Image references not pinned to `:latest`, or the parse sentinel.
    pub pinned_images: Vec<String>,
    /// Empty unless a step failed; names the failing step.
    pub error: String,
}

impl StackStatus {
    pub fn new(folder: PathBuf) -> Self {
        Self {
            folder,
            pulled: false,
            downed: false,
            upped: false,
            health: None,
            pinned_images: Vec::new(),
            error: String::new(),
        }
    }

    /// True iff every step ran and the stack came back healthy.
    pub fn succeeded(&self) -> bool {
        self.error.is_empty() && self.health == Some(HealthVerdict::Healthy)
    }
}

/// Host package update record, one per run.
#[derive(Debug, Clone, Default)]
pub struct OsUpdateStatus {
    pub refreshed: bool,
    pub upgraded: bool,
    /// Diagnostics from both steps, newline-separated.
    pub error: String,
}

impl OsUpdateStatus {
    pub fn succeeded(&self) -> bool {
        self.refreshed && self.upgraded
    }
}

/// Everything one run produced. Lives only until the summary is delivered.
#[derive(Debug, Default)]
pub struct RunReport {
    pub stacks: Vec<StackStatus>,
    /// None when OS patching was skipped.
    pub os: Option<OsUpdateStatus>,
}
