//! Configuration from the hook environment.
//!
//! [`HookConfig`] is read for every operation and cannot fail.
//! [`ChallengeSettings`] holds the polling and resolver settings, which only
//! `deploy_challenge` parses, so a bad value there never breaks cleanup or
//! notifications.

use flarehook::notify::CredentialSources;
use flarehook::{parse_nameservers, HookError, PollConfig, Result};
use std::net::SocketAddr;
use std::time::Duration;

/// Resolver override list
pub const ENV_DNS_SERVERS: &str = "CF_DNS_SERVERS";
/// Seconds to wait between creating records and the first poll
pub const ENV_SETTLE_TIME: &str = "CF_SETTLE_TIME";
/// Optional per-record propagation deadline in seconds
pub const ENV_MAX_WAIT: &str = "CF_MAX_WAIT";
/// Presence enables debug logging
pub const ENV_DEBUG: &str = "CF_DEBUG";
/// API base URL override
pub const ENV_API_BASE_URL: &str = "CF_API_BASE_URL";

/// Settings shared by every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookConfig {
    /// Verbose logging.
    pub debug: bool,

    /// Cloudflare API base URL, if overridden.
    pub api_base_url: Option<String>,

    /// Which credential variables are present.
    pub credential_sources: CredentialSources,
}

/// Whether `CF_DEBUG` is present, regardless of its value.
pub fn debug_enabled<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_DEBUG).is_some()
}

impl HookConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(ENV_API_BASE_URL)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let credential_sources = CredentialSources {
            token: lookup(flarehook::credentials::ENV_API_TOKEN).is_some(),
            legacy: lookup(flarehook::credentials::ENV_EMAIL).is_some()
                || lookup(flarehook::credentials::ENV_KEY).is_some(),
        };

        Self {
            debug: debug_enabled(&lookup),
            api_base_url,
            credential_sources,
        }
    }
}

/// Propagation settings used by `deploy_challenge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeSettings {
    /// Nameservers for propagation checks; empty means system resolvers.
    pub dns_servers: Vec<SocketAddr>,

    /// Pause after creating records.
    pub settle_time: Duration,

    /// Give up polling a record after this long.
    pub max_wait: Option<Duration>,
}

impl Default for ChallengeSettings {
    fn default() -> Self {
        Self {
            dns_servers: Vec::new(),
            settle_time: PollConfig::new().settle_time,
            max_wait: None,
        }
    }
}

impl ChallengeSettings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dns_servers = match lookup(ENV_DNS_SERVERS) {
            Some(list) => parse_nameservers(&list).map_err(HookError::from)?,
            None => Vec::new(),
        };

        let settle_time = match lookup(ENV_SETTLE_TIME) {
            Some(value) => Duration::from_secs(parse_seconds(ENV_SETTLE_TIME, &value)?),
            None => PollConfig::new().settle_time,
        };

        let max_wait = lookup(ENV_MAX_WAIT)
            .map(|value| parse_seconds(ENV_MAX_WAIT, &value).map(Duration::from_secs))
            .transpose()?;

        Ok(Self {
            dns_servers,
            settle_time,
            max_wait,
        })
    }

    /// Orchestrator timing derived from these settings.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new()
            .settle_time(self.settle_time)
            .max_wait(self.max_wait)
    }
}

fn parse_seconds(name: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        HookError::Config(format!(
            "{name} must be a whole number of seconds, got {value:?}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        assert_eq!(HookConfig::from_lookup(env(&[])), HookConfig::default());

        let settings = ChallengeSettings::from_lookup(env(&[])).unwrap();
        assert_eq!(settings, ChallengeSettings::default());
        assert_eq!(settings.settle_time, Duration::from_secs(10));
        assert!(settings.dns_servers.is_empty());
    }

    #[test]
    fn reads_hook_variables() {
        let config = HookConfig::from_lookup(env(&[
            ("CF_DEBUG", ""),
            ("CF_API_BASE_URL", "http://127.0.0.1:8080"),
            ("CF_API_TOKEN", "tok"),
        ]));

        assert!(config.debug);
        assert_eq!(config.api_base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert!(config.credential_sources.token);
        assert!(!config.credential_sources.legacy);
    }

    #[test]
    fn reads_challenge_variables() {
        let settings = ChallengeSettings::from_lookup(env(&[
            ("CF_DNS_SERVERS", "1.1.1.1 8.8.8.8:5353"),
            ("CF_SETTLE_TIME", "0"),
            ("CF_MAX_WAIT", "600"),
        ]))
        .unwrap();

        assert_eq!(settings.dns_servers.len(), 2);
        assert_eq!(settings.dns_servers[1].port(), 5353);
        assert_eq!(settings.settle_time, Duration::ZERO);
        assert_eq!(settings.max_wait, Some(Duration::from_secs(600)));

        let poll = settings.poll_config();
        assert_eq!(poll.backoff, Duration::from_secs(30));
        assert_eq!(poll.max_wait, Some(Duration::from_secs(600)));
    }

    #[test]
    fn blank_dns_servers_means_system_resolvers() {
        let settings = ChallengeSettings::from_lookup(env(&[("CF_DNS_SERVERS", "  ")])).unwrap();
        assert!(settings.dns_servers.is_empty());
    }

    #[test]
    fn invalid_settle_time_is_rejected() {
        let err = ChallengeSettings::from_lookup(env(&[("CF_SETTLE_TIME", "soon")])).unwrap_err();
        assert!(matches!(err, HookError::Config(msg) if msg.contains("CF_SETTLE_TIME")));
    }

    #[test]
    fn invalid_nameserver_is_rejected() {
        let err =
            ChallengeSettings::from_lookup(env(&[("CF_DNS_SERVERS", "1.1.1.1 resolver.local")]))
                .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn bad_challenge_settings_do_not_affect_hook_config() {
        let config = HookConfig::from_lookup(env(&[
            ("CF_SETTLE_TIME", "ten"),
            ("CF_MAX_WAIT", "-1"),
            ("CF_DNS_SERVERS", "resolver.local"),
        ]));
        assert_eq!(config, HookConfig::default());
    }

    #[test]
    fn legacy_sources_detected() {
        let config = HookConfig::from_lookup(env(&[("CF_KEY", "k")]));
        assert!(config.credential_sources.legacy);
        assert!(!config.credential_sources.token);
    }
}
