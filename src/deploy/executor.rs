// ABOUTME: Runs a sync plan through a spawner, one pass at a time.
// ABOUTME: A failed pass is logged and stops everything after it.

use crate::command::SyncPlan;
use crate::error::{Error, Result};
use crate::output::Output;
use crate::spawn::Spawner;

pub async fn run_plan<S>(plan: &SyncPlan, spawner: &S, output: &Output) -> Result<()>
where
    S: Spawner + ?Sized,
{
    for invocation in plan.iter() {
        output.progress(&format!("  → Running rsync ({})...", invocation.pass));
        tracing::debug!("Running: {}", invocation);

        // Awaited before the next pass starts: the update pass must see every
        // file the create pass wrote.
        if let Err(source) = spawner.spawn(invocation).await {
            tracing::error!("rsync {} failed: {}", invocation.pass, source);
            return Err(Error::Sync {
                pass: invocation.pass,
                source,
            });
        }

        tracing::info!("rsync {} completed", invocation.pass);
    }

    Ok(())
}
