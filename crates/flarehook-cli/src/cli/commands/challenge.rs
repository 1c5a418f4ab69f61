//! `deploy_challenge` and `clean_challenge`.

use anyhow::Result;
use flarehook::{ChallengeArgRecord, ChallengeOrchestrator};
use tracing::debug;

use super::Context;
use crate::config::ChallengeSettings;

/// Create every challenge record and wait until all of them resolve.
pub async fn deploy(ctx: &Context, args: &[String]) -> Result<()> {
    let batch = ChallengeArgRecord::parse_batch(args)?;
    let settings = ChallengeSettings::from_env()?;
    let orchestrator =
        ChallengeOrchestrator::new(ctx.client()?, ctx.checker(&settings)?, settings.poll_config());

    debug!(records = batch.len(), "Deploying challenges");
    orchestrator.create_all(&batch).await?;
    Ok(())
}

/// Remove every challenge record.
pub async fn clean(ctx: &Context, args: &[String]) -> Result<()> {
    let batch = ChallengeArgRecord::parse_batch(args)?;
    let client = ctx.client()?;

    debug!(records = batch.len(), "Cleaning challenges");
    flarehook::delete_all(&client, &batch).await?;
    Ok(())
}
