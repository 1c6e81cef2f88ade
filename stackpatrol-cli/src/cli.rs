use clap::{Parser, Subcommand};

use crate::commands::{check::CheckArgs, run::RunArgs};

#[derive(Parser, Debug)]
#[command(name = "stackpatrol", version)]
#[command(about = "Unattended maintenance for Docker Compose hosts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update every stack, patch the OS, and deliver a summary
    Run(RunArgs),

    /// List stacks whose images are not pinned to :latest, without touching anything
    Check(CheckArgs),
}
