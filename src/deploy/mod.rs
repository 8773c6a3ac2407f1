// ABOUTME: Deployment entry point: validate, plan, and run rsync.
// ABOUTME: Missing settings yield configuration help instead of an error.

mod executor;

pub use executor::run_plan;

use std::path::{Path, PathBuf};

use crate::command::SyncPlan;
use crate::config::{DeployConfig, HELP, MissingFields};
use crate::error::Result;
use crate::output::Output;
use crate::spawn::Spawner;
use crate::transport::Transport;

/// Caller-provided environment for a deployment.
#[derive(Debug, Clone)]
pub struct DeployContext {
    public_dir: PathBuf,
}

impl DeployContext {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Local directory used as the rsync source.
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }
}

/// Result of planning a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Planned {
    Unconfigured(MissingFields),
    Ready(SyncPlan),
}

/// Result of a deployment that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Required settings were missing; help was shown and nothing ran.
    Unconfigured(MissingFields),
    /// Every planned rsync pass exited successfully.
    Completed { passes: usize },
}

/// Build the rsync invocations for `config` without running anything.
pub fn plan(context: &DeployContext, config: &DeployConfig) -> Result<Planned> {
    let target = match config.validate() {
        Ok(target) => target,
        Err(missing) => return Ok(Planned::Unconfigured(missing)),
    };

    let options = config.options();
    let transport = Transport::resolve(config.port, config.key.as_deref(), config.rsh.as_deref());

    let plan = SyncPlan::build(
        context.public_dir(),
        &target,
        &options,
        transport.as_ref(),
        config.args.as_deref(),
    )?;

    Ok(Planned::Ready(plan))
}

/// Deploy the public directory according to `config`.
///
/// Passes run one after another; the first failure stops the deployment and
/// is returned.
pub async fn deploy<S>(
    context: &DeployContext,
    config: &DeployConfig,
    spawner: &S,
    output: &Output,
) -> Result<DeployOutcome>
where
    S: Spawner + ?Sized,
{
    let plan = match plan(context, config)? {
        Planned::Ready(plan) => plan,
        Planned::Unconfigured(missing) => {
            tracing::debug!("{}", missing);
            output.help(HELP);
            return Ok(DeployOutcome::Unconfigured(missing));
        }
    };

    run_plan(&plan, spawner, output).await?;

    Ok(DeployOutcome::Completed {
        passes: plan.passes().len(),
    })
}
