//! Lifecycle notifications from the ACME client.
//!
//! These handlers only log. They never touch the network and never fail, so
//! missing arguments are reported as absent rather than rejected.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Arguments of `deploy_cert`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployedCert {
    /// Certificate's primary domain
    pub domain: Option<String>,
    /// Path to the private key
    pub privkey: Option<String>,
    /// Path to the certificate
    pub cert: Option<String>,
    /// Path to the full chain
    pub fullchain: Option<String>,
    /// Path to the intermediate chain
    pub chain: Option<String>,
    /// Issue timestamp (unix seconds)
    pub timestamp: Option<String>,
}

impl DeployedCert {
    /// Read `(domain, privkey, cert, fullchain, chain, timestamp)` positionally
    #[must_use]
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let arg = |idx: usize| args.get(idx).map(|s| s.as_ref().to_string());
        Self {
            domain: arg(0),
            privkey: arg(1),
            cert: arg(2),
            fullchain: arg(3),
            chain: arg(4),
            timestamp: arg(5),
        }
    }

    /// Issue time, if the timestamp argument is a valid unix time
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.timestamp.as_deref()?.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

/// `deploy_cert`: log where the new certificate was written
pub fn deploy_cert<S: AsRef<str>>(args: &[S]) {
    let cert = DeployedCert::from_args(args);
    let issued = cert
        .issued_at()
        .map_or_else(|| "unknown".to_string(), |at| at.to_rfc3339());

    info!(domain = cert.domain.as_deref().unwrap_or("<none>"), issued = %issued, "Certificate deployed");
    debug!(
        "ssl_certificate: {}",
        cert.fullchain.as_deref().unwrap_or("<none>")
    );
    debug!(
        "ssl_certificate_key: {}",
        cert.privkey.as_deref().unwrap_or("<none>")
    );
}

/// `unchanged_cert`: nothing to do
pub fn unchanged_cert<S: AsRef<str>>(args: &[S]) {
    debug!(
        domain = args.first().map_or("<none>", AsRef::as_ref),
        "Certificate unchanged"
    );
}

/// `invalid_challenge`: log the domain and the error reported by the CA
pub fn invalid_challenge<S: AsRef<str>>(args: &[S]) {
    let domain = args.first().map_or("<none>", AsRef::as_ref);
    let message = args
        .iter()
        .skip(1)
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ");

    debug!(domain, "invalid_challenge");
    debug!("Full error: {message}");
}

/// Which credential variables are present at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialSources {
    /// `CF_API_TOKEN` is set
    pub token: bool,
    /// `CF_EMAIL` or `CF_KEY` is set
    pub legacy: bool,
}

/// Advice printed by `startup_hook` for the given credential sources
#[must_use]
pub const fn startup_advisory(sources: CredentialSources) -> Option<&'static str> {
    match (sources.token, sources.legacy) {
        (true, true) => Some(
            "Both CF_API_TOKEN and CF_EMAIL/CF_KEY are set. CF_EMAIL and CF_KEY are no longer \
             needed; consider removing them from your environment.",
        ),
        (false, true) => Some(
            "Using Cloudflare account email/key authentication (CF_EMAIL and CF_KEY). This method \
             is deprecated; switch to API tokens (CF_API_TOKEN) for scoped access.",
        ),
        _ => None,
    }
}

/// `startup_hook`: warn about legacy credential configuration
pub fn startup_hook(sources: CredentialSources) {
    if let Some(advice) = startup_advisory(sources) {
        warn!("{advice}");
    }
}

/// `exit_hook`: nothing to do
pub fn exit_hook() {
    debug!("Exit hook");
}
