//! Post-restart health verification.
//!
//! A stack counts as healthy when every one of its containers reports state
//! `running` and, where a health probe is configured, probe status `healthy`.
//! Inspection runs as a poll: an initial settle delay lets probes fire at
//! least once, then the stack is probed with exponential backoff until a
//! deadline. Inspection failures never propagate; they degrade to a
//! non-healthy verdict.

use crate::options::PatrolOptions;
use crate::runner::run_shell;
use crate::status::HealthVerdict;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// One container's `.State`, as printed by `inspect --format '{{json .State}}'`.
#[derive(Debug, Deserialize)]
struct ContainerState {
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "Health")]
    health: Option<HealthProbe>,
}

#[derive(Debug, Deserialize)]
struct HealthProbe {
    #[serde(rename = "Status", default)]
    status: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Probe {
    /// Every container running and healthy.
    Ready,
    /// Still converging: starting, restarting, or no containers listed yet.
    NotReady(String),
    /// A state that will not self-heal; polling further is pointless.
    Fatal(String),
    /// The inspection itself failed (command error, malformed output).
    Error(String),
}

/// Poll the stack in `dir` until it is healthy, fails terminally, or the
/// configured deadline passes.
pub async fn wait_for_healthy(opts: &PatrolOptions, dir: &Path) -> HealthVerdict {
    if !opts.settle().is_zero() {
        debug!(secs = opts.settle_secs, "settling before first health probe");
        tokio::time::sleep(opts.settle()).await;
    }

    let deadline = Instant::now() + opts.health_timeout();
    let mut backoff = INITIAL_BACKOFF;

    loop {
        match probe_once(opts, dir).await {
            Probe::Ready => return HealthVerdict::Healthy,
            Probe::Fatal(reason) => {
                warn!(stack = %dir.display(), reason, "stack unhealthy");
                return HealthVerdict::Unhealthy;
            }
            Probe::NotReady(reason) => {
                if Instant::now() >= deadline {
                    warn!(stack = %dir.display(), reason, "health poll deadline reached");
                    return HealthVerdict::TimedOut;
                }
                debug!(stack = %dir.display(), reason, "not healthy yet, backing off");
            }
            Probe::Error(reason) => {
                if Instant::now() >= deadline {
                    warn!(stack = %dir.display(), reason, "health inspection kept failing");
                    return HealthVerdict::Unhealthy;
                }
                debug!(stack = %dir.display(), reason, "health inspection failed, backing off");
            }
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        tokio::time::sleep(backoff.min(remaining)).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}

async fn probe_once(opts: &PatrolOptions, dir: &Path) -> Probe {
    let ps = run_shell(&format!("{} compose ps -q", opts.engine_bin), dir).await;
    if !ps.ok {
        return Probe::Error(format!("compose ps failed: {}", ps.stderr.trim()));
    }

    let ids: Vec<&str> = ps.stdout.split_whitespace().collect();
    if ids.is_empty() {
        return Probe::NotReady("no containers reported".to_string());
    }

    let inspect = run_shell(
        &format!(
            "{} inspect --format '{{{{json .State}}}}' {}",
            opts.engine_bin,
            ids.join(" ")
        ),
        dir,
    )
    .await;
    if !inspect.ok {
        return Probe::Error(format!("inspect failed: {}", inspect.stderr.trim()));
    }

    classify_states(&inspect.stdout)
}

/// Classify the newline-delimited JSON state objects of all containers in a
/// stack (one object per line, one line per container).
fn classify_states(raw: &str) -> Probe {
    let mut seen = 0usize;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let state: ContainerState = match serde_json::from_str(line) {
            Ok(state) => state,
            Err(err) => return Probe::Error(format!("malformed inspect output: {}", err)),
        };
        seen += 1;

        // Terminal container states win over whatever the probe last said
        if matches!(state.status.as_str(), "exited" | "dead") {
            return Probe::Fatal(format!("container state is {}", state.status));
        }

        if let Some(probe) = &state.health {
            match probe.status.as_str() {
                "healthy" => {}
                "unhealthy" => {
                    return Probe::Fatal("container health probe reports unhealthy".to_string())
                }
                other => return Probe::NotReady(format!("health probe still {}", other)),
            }
        }

        if state.status != "running" {
            return Probe::NotReady(format!("container state is {}", state.status));
        }
    }

    if seen == 0 {
        return Probe::NotReady("no containers reported".to_string());
    }
    Probe::Ready
}
