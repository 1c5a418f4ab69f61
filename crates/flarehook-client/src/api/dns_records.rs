//! DNS record API endpoints.

use crate::CloudflareClient;
use flarehook_core::{AuthContext, HookError, NewTxtRecord, RecordId, Result, TxtRecord};

/// DNS record API endpoints, scoped to a zone per call
pub struct DnsRecordsApi<'a> {
    client: &'a CloudflareClient,
}

impl<'a> DnsRecordsApi<'a> {
    pub(crate) const fn new(client: &'a CloudflareClient) -> Self {
        Self { client }
    }

    /// List TXT records matching an exact name and content
    ///
    /// A 404 is reported as an empty list.
    pub async fn list_txt(
        &self,
        auth: &AuthContext,
        zone_id: &str,
        name: &str,
        content: &str,
    ) -> Result<Vec<TxtRecord>> {
        let path = format!("/zones/{zone_id}/dns_records");
        let params = [("type", "TXT"), ("name", name), ("content", content)];

        match self
            .client
            .get_with_query::<Vec<TxtRecord>>(auth, &path, &params)
            .await
        {
            Ok(records) => Ok(records.unwrap_or_default()),
            Err(HookError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Create a TXT record and return its id
    pub async fn create_txt(
        &self,
        auth: &AuthContext,
        zone_id: &str,
        name: &str,
        content: &str,
    ) -> Result<String> {
        let path = format!("/zones/{zone_id}/dns_records");
        let body = NewTxtRecord::challenge(name, content);

        let created: Option<RecordId> = self.client.post(auth, &path, &body).await?;
        created
            .and_then(|record| record.id)
            .ok_or_else(|| HookError::MissingRecordId {
                name: name.to_string(),
            })
    }

    /// Delete a record by id
    pub async fn delete(&self, auth: &AuthContext, zone_id: &str, record_id: &str) -> Result<()> {
        let path = format!("/zones/{zone_id}/dns_records/{record_id}");
        let _: Option<RecordId> = self.client.delete(auth, &path).await?;
        Ok(())
    }
}
