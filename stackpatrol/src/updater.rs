//! Per-stack update orchestration.
//!
//! Each discovered stack goes through pull → down → up → health, one command
//! at a time. The first failing command records its stderr against the stack
//! and aborts the remaining steps for that stack only; the run then moves on
//! to the next stack. An unhealthy verdict is recorded, never escalated.

use crate::compose;
use crate::discover;
use crate::health;
use crate::options::PatrolOptions;
use crate::ospatch;
use crate::runner::run_shell;
use crate::status::{RunReport, StackStatus};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct StackUpdater {
    opts: PatrolOptions,
}

impl StackUpdater {
    pub fn new(opts: PatrolOptions) -> Self {
        Self { opts }
    }

    /// Execute the full maintenance run: every stack under the base
    /// directory, then the OS patch, then the image prune.
    pub async fn run(&self) -> RunReport {
        info!(base_dir = %self.opts.base_dir.display(), "starting maintenance run");
        let mut report = RunReport::default();

        for compose_file in discover::find_compose_files(&self.opts.base_dir) {
            info!(stack = %compose_file.display(), "processing stack");
            report.stacks.push(self.update_stack(&compose_file).await);
        }

        if self.opts.skip_os_update {
            info!("OS update skipped");
        } else {
            report.os = Some(ospatch::patch_os(&self.opts).await);
        }

        if self.opts.prune_images {
            ospatch::prune_images(&self.opts).await;
        }

        info!(stacks = report.stacks.len(), "maintenance run finished");
        report
    }

    /// Update one stack and return its finalized status record.
    pub async fn update_stack(&self, compose_file: &Path) -> StackStatus {
        let folder: PathBuf = compose_file
            .parent()
            .unwrap_or_else(|| Path::new("/"))
            .to_path_buf();
        let mut status = StackStatus::new(folder.clone());

        // Informational only; computed up front so it is attached no matter
        // where the sequence stops.
        status.pinned_images = compose::pinned_images(compose_file);

        info!(stack = %folder.display(), "pulling images");
        let out = run_shell(&format!("{} compose pull", self.opts.engine_bin), &folder).await;
        status.pulled = out.ok;
        if !out.ok {
            status.error = format!("Pull failed: {}", out.stderr.trim());
            return status;
        }

        info!(stack = %folder.display(), "tearing down");
        let out = run_shell(&format!("{} compose down", self.opts.engine_bin), &folder).await;
        status.downed = out.ok;
        if !out.ok {
            status.error = format!("Down failed: {}", out.stderr.trim());
            return status;
        }

        info!(stack = %folder.display(), "recreating");
        let out = run_shell(&format!("{} compose up -d", self.opts.engine_bin), &folder).await;
        status.upped = out.ok;
        if !out.ok {
            status.error = format!("Up failed: {}", out.stderr.trim());
            return status;
        }

        let verdict = health::wait_for_healthy(&self.opts, &folder).await;
        info!(stack = %folder.display(), %verdict, "health check finished");
        status.health = Some(verdict);
        status
    }
}
