//! TXT record propagation checks.

use crate::error::{PropagationError, PropagationResult};
use hickory_resolver::config::{NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::rdata::TXT;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::{Resolver, TokioResolver};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, trace};

const DNS_PORT: u16 = 53;

/// Resolver settings for propagation checks
#[derive(Debug, Clone)]
pub struct PropagationConfig {
    /// Nameservers to query (empty = system configuration)
    pub nameservers: Vec<SocketAddr>,
    /// Per-query timeout
    pub timeout: Duration,
    /// Attempts per nameserver before a query fails
    pub attempts: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            timeout: Duration::from_secs(5),
            attempts: 2,
        }
    }
}

impl PropagationConfig {
    /// Use an explicit nameserver list
    #[must_use]
    pub fn nameservers(mut self, nameservers: Vec<SocketAddr>) -> Self {
        self.nameservers = nameservers;
        self
    }

    /// Set the per-query timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of attempts
    #[must_use]
    pub const fn attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }
}

/// Parse a `CF_DNS_SERVERS` entry: `1.1.1.1`, `2606:4700::1111` or `1.1.1.1:5353`
pub fn parse_nameserver(entry: &str) -> PropagationResult<SocketAddr> {
    entry
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .or_else(|_| entry.parse::<SocketAddr>())
        .map_err(|_| PropagationError::InvalidNameserver(entry.to_string()))
}

/// Parse a whitespace-separated `CF_DNS_SERVERS` list; blank means none
pub fn parse_nameservers(list: &str) -> PropagationResult<Vec<SocketAddr>> {
    list.split_whitespace().map(parse_nameserver).collect()
}

/// True if any character-string of a TXT record equals `token` exactly
pub fn txt_contains_token<'a, I>(strings: I, token: &str) -> bool
where
    I: IntoIterator<Item = &'a [u8]>,
{
    strings
        .into_iter()
        .any(|data| String::from_utf8_lossy(data) == token)
}

/// True if any TXT record in an answer carries `token`
pub fn records_contain_token<'a, I>(records: I, record_name: &str, token: &str) -> bool
where
    I: IntoIterator<Item = &'a TXT>,
{
    records.into_iter().any(|txt| {
        trace!(record = record_name, value = %txt, "Checking TXT record");
        txt_contains_token(txt.txt_data().iter().map(|data| &**data), token)
    })
}

/// Checks whether challenge TXT records are visible to resolvers
pub struct PropagationChecker {
    resolver: TokioResolver,
    nameservers: Vec<SocketAddr>,
}

impl PropagationChecker {
    /// Checker using the system resolver configuration
    pub fn system() -> PropagationResult<Self> {
        Self::with_config(PropagationConfig::default())
    }

    /// Checker with custom configuration
    pub fn with_config(config: PropagationConfig) -> PropagationResult<Self> {
        let mut opts = ResolverOpts::default();
        opts.timeout = config.timeout;
        opts.attempts = config.attempts;
        // Every poll must reach the nameservers.
        opts.cache_size = 0;

        let resolver = if config.nameservers.is_empty() {
            TokioResolver::builder_tokio()
                .map_err(|e| {
                    PropagationError::Resolver(format!("failed to read system resolver config: {e}"))
                })?
                .with_options(opts)
                .build()
        } else {
            let mut resolver_config = ResolverConfig::new();
            for addr in &config.nameservers {
                resolver_config.add_name_server(NameServerConfig::new(*addr, Protocol::Udp));
                resolver_config.add_name_server(NameServerConfig::new(*addr, Protocol::Tcp));
            }
            Resolver::builder_with_config(resolver_config, TokioConnectionProvider::default())
                .with_options(opts)
                .build()
        };

        Ok(Self {
            resolver,
            nameservers: config.nameservers,
        })
    }

    /// Explicit nameservers, empty when the system configuration is used
    #[must_use]
    pub fn nameservers(&self) -> &[SocketAddr] {
        &self.nameservers
    }

    /// Single TXT query for `record_name`; true if it carries `token`
    ///
    /// Timeouts, NXDOMAIN, SERVFAIL and empty answers all count as "not yet".
    pub async fn has_propagated(&self, record_name: &str, token: &str) -> bool {
        let fqdn = format!("{}.", record_name.trim_end_matches('.'));

        match self.resolver.txt_lookup(fqdn.as_str()).await {
            Ok(lookup) => {
                let found = records_contain_token(lookup.iter(), record_name, token);
                if !found {
                    debug!(record = record_name, "TXT record present but token not found");
                }
                found
            }
            Err(e) => {
                debug!(record = record_name, error = %e, "TXT lookup failed, retrying later");
                false
            }
        }
    }
}

impl std::fmt::Debug for PropagationChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagationChecker")
            .field("nameservers", &self.nameservers)
            .finish_non_exhaustive()
    }
}
