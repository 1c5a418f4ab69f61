//! flarehook - Cloudflare DNS-01 hook
//!
//! Invoked by dehydrated (or any client speaking its hook protocol).

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    flarehook_cli::run().await
}
