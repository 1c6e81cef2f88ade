use clap::Args;
use std::path::{Path, PathBuf};

use stackpatrol::{compose, discover, report};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Root directory scanned recursively for compose stacks
    #[arg(long, default_value = "/docker")]
    pub base_dir: PathBuf,
}

/// Read-only audit: one line per stack, naming the images that would keep
/// their pinned tag through an update run. Never invokes the engine.
pub async fn execute(args: CheckArgs) -> anyhow::Result<i32> {
    for compose_file in discover::find_compose_files(&args.base_dir) {
        let folder = compose_file
            .parent()
            .unwrap_or_else(|| Path::new("/"))
            .to_path_buf();
        let images = compose::pinned_images(&compose_file);
        println!(
            "{} - not latest: {}",
            folder.display(),
            report::format_images(&images)
        );
    }
    Ok(0)
}
