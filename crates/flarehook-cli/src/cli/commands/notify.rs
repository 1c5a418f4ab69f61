//! Notification operations; these only log.

use flarehook::notify;

use super::Context;
use crate::cli::args::Operation;

/// Handle a notification operation. Challenge operations are ignored here.
pub fn execute(ctx: &Context, op: Operation, args: &[String]) {
    match op {
        Operation::DeployCert => notify::deploy_cert(args),
        Operation::UnchangedCert => notify::unchanged_cert(args),
        Operation::InvalidChallenge => notify::invalid_challenge(args),
        Operation::StartupHook => notify::startup_hook(ctx.config.credential_sources),
        Operation::ExitHook => notify::exit_hook(),
        Operation::DeployChallenge | Operation::CleanChallenge => {}
    }
}
