// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rsync-deploy")]
#[command(about = "Publish a static site directory to a remote host with rsync")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a deploy.yml template in the current directory
    Init {
        /// Overwrite an existing deploy.yml
        #[arg(short, long)]
        force: bool,
    },

    /// Sync the public directory to every configured rsync target
    Deploy {
        /// Configuration file (default: deploy.yml, deploy.yaml or _config.yml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Local directory to publish, overriding public_dir from the config
        #[arg(short, long)]
        public_dir: Option<PathBuf>,

        /// Print the rsync commands instead of running them
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}
