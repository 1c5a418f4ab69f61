//! Operation implementations.

pub mod challenge;
pub mod notify;

use anyhow::{Context as _, Result};
use flarehook::{CloudflareClient, Credentials, PropagationChecker, PropagationConfig};

use crate::config::{ChallengeSettings, HookConfig};

/// Shared state for every operation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Environment configuration
    pub config: HookConfig,

    /// Credentials resolved at startup
    pub credentials: Credentials,
}

impl Context {
    /// Create a Cloudflare client from the resolved credentials.
    pub fn client(&self) -> Result<CloudflareClient> {
        let mut builder = CloudflareClient::builder(self.credentials.clone());
        if let Some(url) = &self.config.api_base_url {
            builder = builder.base_url(url.as_str());
        }
        builder.build().context("failed to create Cloudflare client")
    }

    /// Create a propagation checker for the configured nameservers.
    pub fn checker(&self, settings: &ChallengeSettings) -> Result<PropagationChecker> {
        let config = PropagationConfig::default().nameservers(settings.dns_servers.clone());
        PropagationChecker::with_config(config).context("failed to create DNS resolver")
    }
}
