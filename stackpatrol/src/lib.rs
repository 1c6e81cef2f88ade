//! Stackpatrol - unattended maintenance for Docker Compose hosts
//!
//! Walks a directory tree for compose stacks, refreshes each stack's images
//! (pull, down, up), verifies post-restart container health, patches the host
//! package index, reclaims dangling image layers, and renders one plain-text
//! summary for delivery to a webhook.
//!
//! The whole run is deliberately sequential: one stack at a time, one command
//! at a time, no retries. A failing step aborts only the remaining steps of
//! that stack; every other stack and the OS patch still run.

pub mod compose;
pub mod discover;
pub mod errors;
pub mod health;
pub mod notify;
pub mod options;
pub mod ospatch;
pub mod report;
pub mod runner;
pub mod status;
pub mod updater;

pub use errors::{PatrolError, PatrolResult};
pub use options::PatrolOptions;
pub use status::{HealthVerdict, OsUpdateStatus, RunReport, StackStatus};
pub use updater::StackUpdater;
