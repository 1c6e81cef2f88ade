//! Configuration for a maintenance run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Options controlling one maintenance run.
///
/// Every knob has a default suitable for a Debian-family host running the
/// Docker CLI; the webhook URL is the only field with no default and must be
/// supplied from the environment or the command line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatrolOptions {
    /// Root directory scanned recursively for compose stacks.
    ///
    /// Default: /docker
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Webhook receiving the run summary as `{"text": ...}`.
    ///
    /// None disables delivery; the summary is still printed.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Container engine binary. `podman` works as a drop-in here since only
    /// the `compose`, `inspect` and `image prune` subcommands are used.
    ///
    /// Default: docker
    #[serde(default = "default_engine_bin")]
    pub engine_bin: String,

    /// Package manager binary, invoked as `<bin> update -y` / `<bin> upgrade -y`.
    ///
    /// Default: apt-get
    #[serde(default = "default_apt_bin")]
    pub apt_bin: String,

    /// Delay before the first health probe, giving configured health checks
    /// a chance to run at least once after `up -d`.
    ///
    /// Default: 10
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,

    /// Deadline for the health poll, measured from the end of the settle
    /// delay. Containers still starting when it expires are reported as
    /// timed out.
    ///
    /// Default: 120
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// Skip the package index refresh and upgrade entirely.
    ///
    /// Default: false
    #[serde(default)]
    pub skip_os_update: bool,

    /// Run `image prune -f` after the OS patch. Best effort; the outcome is
    /// logged but not reported.
    ///
    /// Default: true
    #[serde(default = "default_true")]
    pub prune_images: bool,

    /// Attempt the package upgrade even when the index refresh failed.
    /// Matches the historical best-effort behavior of this job; disable to
    /// make a failed refresh skip the upgrade.
    ///
    /// Default: true
    #[serde(default = "default_true")]
    pub upgrade_after_failed_refresh: bool,
}

impl Default for PatrolOptions {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            webhook_url: None,
            engine_bin: default_engine_bin(),
            apt_bin: default_apt_bin(),
            settle_secs: default_settle_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            skip_os_update: false,
            prune_images: true,
            upgrade_after_failed_refresh: true,
        }
    }
}

impl PatrolOptions {
    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("/docker")
}

fn default_engine_bin() -> String {
    "docker".to_string()
}

fn default_apt_bin() -> String {
    "apt-get".to_string()
}

fn default_settle_secs() -> u64 {
    10
}

fn default_health_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}
