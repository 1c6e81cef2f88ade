use clap::Args;
use std::path::PathBuf;
use sysinfo::System;
use tracing::warn;

use stackpatrol::{notify, report, PatrolOptions, StackUpdater};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Root directory scanned recursively for compose stacks
    #[arg(long, default_value = "/docker")]
    pub base_dir: PathBuf,

    /// Webhook receiving the summary; omit to print only
    #[arg(long, env = "STACKPATROL_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Seconds to wait before the first health probe
    #[arg(long, default_value_t = 10)]
    pub settle_secs: u64,

    /// Health poll deadline in seconds
    #[arg(long, default_value_t = 120)]
    pub health_timeout_secs: u64,

    /// Skip the package index refresh and upgrade
    #[arg(long)]
    pub skip_os_update: bool,

    /// Skip the image prune after the OS patch
    #[arg(long)]
    pub no_prune: bool,

    /// Skip the package upgrade when the index refresh failed
    #[arg(long)]
    pub no_upgrade_after_failed_refresh: bool,

    /// Container engine binary (docker or podman)
    #[arg(long, default_value = "docker")]
    pub engine_bin: String,

    /// Package manager binary
    #[arg(long, default_value = "apt-get")]
    pub apt_bin: String,
}

impl RunArgs {
    fn into_options(self) -> PatrolOptions {
        PatrolOptions {
            base_dir: self.base_dir,
            webhook_url: self.webhook_url,
            engine_bin: self.engine_bin,
            apt_bin: self.apt_bin,
            settle_secs: self.settle_secs,
            health_timeout_secs: self.health_timeout_secs,
            skip_os_update: self.skip_os_update,
            prune_images: !self.no_prune,
            upgrade_after_failed_refresh: !self.no_upgrade_after_failed_refresh,
        }
    }
}

pub async fn execute(args: RunArgs) -> anyhow::Result<i32> {
    let opts = args.into_options();
    let webhook_url = opts.webhook_url.clone();

    let updater = StackUpdater::new(opts);
    let run_report = updater.run().await;

    let hostname = System::host_name().unwrap_or_else(|| "unknown-host".to_string());
    let summary = report::render(&run_report, &hostname);

    // Stdout carries the summary for the job log; logging goes to stderr.
    println!("{}", summary);

    if let Some(url) = webhook_url {
        // Best effort: all work is done, a delivery failure only loses the
        // notification, never the run.
        if let Err(err) = notify::send_report(&url, &summary).await {
            warn!(error = %err, "summary delivery failed");
        }
    }

    Ok(report::exit_code(&run_report))
}
