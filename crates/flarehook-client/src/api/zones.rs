//! Zone API endpoints.

use crate::CloudflareClient;
use flarehook_core::{AuthContext, AuthMode, HookError, Result, Zone, ZoneHandle};
use tracing::debug;

/// Registrable domain (public suffix + one label) for a full domain name
///
/// `www.example.co.uk` becomes `example.co.uk`. The result is lowercase.
pub fn registrable_domain(domain: &str) -> Result<String> {
    let lowered = domain.trim_end_matches('.').to_ascii_lowercase();
    psl::domain_str(&lowered)
        .map(str::to_string)
        .ok_or_else(|| HookError::InvalidDomain(domain.to_string()))
}

/// Zone API endpoints
pub struct ZonesApi<'a> {
    client: &'a CloudflareClient,
}

impl<'a> ZonesApi<'a> {
    pub(crate) const fn new(client: &'a CloudflareClient) -> Self {
        Self { client }
    }

    /// List zones with an exact name, as seen by one credential
    ///
    /// A 404 is reported as an empty list.
    pub async fn list_by_name(&self, auth: &AuthContext, name: &str) -> Result<Vec<Zone>> {
        match self
            .client
            .get_with_query::<Vec<Zone>>(auth, "/zones", &[("name", name)])
            .await
        {
            Ok(zones) => Ok(zones.unwrap_or_default()),
            Err(HookError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Find the zone for a domain and the first credential that can see it
    pub async fn resolve(&self, domain: &str) -> Result<ZoneHandle<'a>> {
        let zone_name = registrable_domain(domain)?;
        let name = zone_name.as_str();
        let credentials = self.client.credentials();

        for auth in credentials {
            let zones = self.list_by_name(auth, name).await?;
            if let Some(zone) = zones.into_iter().next() {
                debug!(domain, zone = name, zone_id = %zone.id, auth = %auth.label(), "Resolved zone");
                return Ok(ZoneHandle { auth, zone });
            }
            debug!(zone = name, auth = %auth.label(), "Zone not visible with credential");
        }

        Err(match credentials.mode() {
            AuthMode::Token => HookError::ZonePermission {
                zone: name.to_string(),
            },
            AuthMode::EmailKey => HookError::ZoneNotFound {
                zone: name.to_string(),
            },
        })
    }
}
