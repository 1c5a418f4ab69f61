//! Command-line argument definitions using clap.

use clap::Parser;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cloudflare DNS-01 hook for dehydrated
///
/// Publishes `_acme-challenge` TXT records through the Cloudflare API and
/// waits until they are visible in DNS.
///
/// Credentials come from CF_API_TOKEN (or CF_EMAIL and CF_KEY).
#[derive(Parser, Debug)]
#[command(name = "flarehook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Hook operation (deploy_challenge, clean_challenge, deploy_cert, ...)
    pub operation: Option<String>,

    /// Operation arguments, passed through untouched
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Hook operation not handled by flarehook
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown hook operation: {0}")]
pub struct UnknownOperation(pub String);

/// Operations of the dehydrated hook protocol handled by flarehook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Publish challenge records and wait for propagation
    DeployChallenge,
    /// Remove challenge records
    CleanChallenge,
    /// A new certificate was written
    DeployCert,
    /// Certificate did not need renewal
    UnchangedCert,
    /// The CA rejected a challenge
    InvalidChallenge,
    /// Client is starting
    StartupHook,
    /// Client is exiting
    ExitHook,
}

impl Operation {
    /// All handled operations
    pub const ALL: [Self; 7] = [
        Self::DeployChallenge,
        Self::CleanChallenge,
        Self::DeployCert,
        Self::UnchangedCert,
        Self::InvalidChallenge,
        Self::StartupHook,
        Self::ExitHook,
    ];

    /// Name used on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeployChallenge => "deploy_challenge",
            Self::CleanChallenge => "clean_challenge",
            Self::DeployCert => "deploy_cert",
            Self::UnchangedCert => "unchanged_cert",
            Self::InvalidChallenge => "invalid_challenge",
            Self::StartupHook => "startup_hook",
            Self::ExitHook => "exit_hook",
        }
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
