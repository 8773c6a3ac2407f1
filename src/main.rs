// ABOUTME: Entry point for the rsync-deploy CLI application.
// ABOUTME: Parses arguments, loads the project file, and runs each rsync entry.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use rsync_deploy::config::{self, HELP, ProjectConfig};
use rsync_deploy::deploy::{self, DeployContext, DeployOutcome, Planned};
use rsync_deploy::error::Result;
use rsync_deploy::output::{Output, OutputMode};
use rsync_deploy::spawn::ProcessSpawner;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    if let Err(e) = run(cli.command, &mut output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands, output: &mut Output) -> Result<()> {
    match command {
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Deploy {
            config,
            public_dir,
            dry_run,
        } => {
            let cwd = env::current_dir()?;
            let (project, project_dir) = match config {
                Some(path) => {
                    let project = ProjectConfig::load(&path)?;
                    let dir = path
                        .parent()
                        .map(|parent| cwd.join(parent))
                        .unwrap_or_else(|| cwd.clone());
                    (project, dir)
                }
                None => (ProjectConfig::discover(&cwd)?, cwd.clone()),
            };

            let public_dir = match public_dir {
                Some(dir) => cwd.join(dir),
                None => project.public_dir_in(&project_dir),
            };
            if !public_dir.is_dir() {
                output.warning(&format!(
                    "public directory {} does not exist",
                    public_dir.display()
                ));
            }
            let context = DeployContext::new(with_trailing_separator(&public_dir));

            if dry_run {
                print_plans(&context, &project, output)
            } else {
                deploy_all(&context, &project, output).await
            }
        }
    }
}

/// Deploy every rsync entry in order, stopping at the first failure.
async fn deploy_all(
    context: &DeployContext,
    project: &ProjectConfig,
    output: &mut Output,
) -> Result<()> {
    output.start_timer();
    let spawner = ProcessSpawner::new();
    let mut completed = 0;

    for entry in project.rsync_entries()? {
        if let Ok(target) = entry.validate() {
            output.progress(&format!(
                "Deploying {} to {}",
                context.public_dir().display(),
                target
            ));
        }

        match deploy::deploy(context, &entry, &spawner, output).await? {
            DeployOutcome::Completed { .. } => completed += 1,
            DeployOutcome::Unconfigured(missing) => tracing::warn!("Skipped entry: {}", missing),
        }
    }

    if completed > 0 {
        output.success("Deployment complete!");
    }
    Ok(())
}

fn print_plans(context: &DeployContext, project: &ProjectConfig, output: &Output) -> Result<()> {
    for entry in project.rsync_entries()? {
        match deploy::plan(context, &entry)? {
            Planned::Ready(plan) => {
                for invocation in plan.iter() {
                    output.command(&invocation.command_line());
                }
            }
            Planned::Unconfigured(_) => output.help(HELP),
        }
    }
    Ok(())
}

/// rsync copies the directory itself unless the source ends with a separator.
fn with_trailing_separator(path: &Path) -> PathBuf {
    let mut raw = OsString::from(path);
    if !raw.to_string_lossy().ends_with(std::path::MAIN_SEPARATOR) {
        raw.push(std::path::MAIN_SEPARATOR_STR);
    }
    PathBuf::from(raw)
}
