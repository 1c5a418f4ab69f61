//! DNS-01 record lifecycle on top of the raw endpoints.

use crate::CloudflareClient;
use flarehook_core::{challenge_record_name, AuthContext, Result, ZoneHandle};
use tracing::{debug, info};

impl CloudflareClient {
    /// Find the zone for `domain` and the credential that can manage it
    pub async fn resolve_zone(&self, domain: &str) -> Result<ZoneHandle<'_>> {
        self.zones().resolve(domain).await
    }

    /// Id of the first TXT record with this exact name and content
    pub async fn find_txt_record(
        &self,
        auth: &AuthContext,
        zone_id: &str,
        name: &str,
        content: &str,
    ) -> Result<Option<String>> {
        let records = self
            .dns_records()
            .list_txt(auth, zone_id, name, content)
            .await?;

        let id = records.into_iter().next().map(|record| record.id);
        if id.is_none() {
            debug!(record = name, "Unable to locate record");
        }
        Ok(id)
    }

    /// Publish `_acme-challenge.<domain>` with `content`, unless it already exists
    pub async fn create_txt_record(&self, domain: &str, content: &str) -> Result<()> {
        let name = challenge_record_name(domain);
        debug!(domain, record = %name, content, "Creating TXT record");

        let handle = self.resolve_zone(domain).await?;
        let zone_id = handle.zone.id.as_str();

        if let Some(record_id) = self
            .find_txt_record(handle.auth, zone_id, &name, content)
            .await?
        {
            debug!(record = %name, record_id = %record_id, "TXT record exists, skipping creation");
            return Ok(());
        }

        let record_id = self
            .dns_records()
            .create_txt(handle.auth, zone_id, &name, content)
            .await?;
        info!(record = %name, record_id = %record_id, "TXT record created");
        Ok(())
    }

    /// Remove `_acme-challenge.<domain>` carrying `content`, if present
    ///
    /// An empty domain means the ACME client failed upstream; nothing is sent.
    pub async fn delete_txt_record(&self, domain: &str, content: &str) -> Result<()> {
        if domain.is_empty() {
            info!("Empty domain in clean_challenge, skipping (http_request() error in ACME client?)");
            return Ok(());
        }

        let name = challenge_record_name(domain);
        let handle = self.resolve_zone(domain).await?;
        let zone_id = handle.zone.id.as_str();

        match self
            .find_txt_record(handle.auth, zone_id, &name, content)
            .await?
        {
            Some(record_id) => {
                self.dns_records()
                    .delete(handle.auth, zone_id, &record_id)
                    .await?;
                info!(record = %name, record_id = %record_id, "Deleted TXT record");
            }
            None => {
                debug!(record = %name, content, "No TXT record with token, nothing to delete");
            }
        }

        Ok(())
    }
}
