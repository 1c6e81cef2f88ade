//! Host package patching and image cleanup.

use crate::options::PatrolOptions;
use crate::runner::run_shell;
use crate::status::OsUpdateStatus;
use std::path::Path;
use tracing::{debug, info, warn};

/// Refresh the package index and upgrade installed packages, both from `/`.
///
/// Both steps are attempted once; diagnostics accumulate into a single
/// newline-separated error string. Whether a failed refresh still allows the
/// upgrade is governed by `upgrade_after_failed_refresh`.
pub async fn patch_os(opts: &PatrolOptions) -> OsUpdateStatus {
    let mut status = OsUpdateStatus::default();
    let mut diagnostics: Vec<String> = Vec::new();
    let root = Path::new("/");

    info!("refreshing package index");
    let out = run_shell(&format!("{} update -y", opts.apt_bin), root).await;
    status.refreshed = out.ok;
    if !out.ok {
        diagnostics.push(format!("Refresh failed: {}", out.stderr.trim()));
    }

    if status.refreshed || opts.upgrade_after_failed_refresh {
        info!("upgrading packages");
        let out = run_shell(&format!("{} upgrade -y", opts.apt_bin), root).await;
        status.upgraded = out.ok;
        if !out.ok {
            diagnostics.push(format!("Upgrade failed: {}", out.stderr.trim()));
        }
    } else {
        warn!("skipping upgrade after failed index refresh");
        diagnostics.push("Upgrade skipped after failed refresh".to_string());
    }

    status.error = diagnostics.join("\n");
    status
}

/// Reclaim dangling image layers. Best effort: the outcome is logged and
/// deliberately left out of the run report.
pub async fn prune_images(opts: &PatrolOptions) {
    info!("pruning unused images");
    let out = run_shell(&format!("{} image prune -f", opts.engine_bin), Path::new("/")).await;
    if out.ok {
        debug!("image prune completed");
    } else {
        warn!(error = %out.stderr.trim(), "image prune failed");
    }
}
