//! Main Cloudflare API client implementation.

use crate::api::{DnsRecordsApi, ZonesApi};
use flarehook_core::{ApiResponse, AuthContext, Credentials, HookError, Result};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The Cloudflare v4 API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudflare API client bound to an ordered credential list
#[derive(Clone)]
pub struct CloudflareClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
}

impl CloudflareClient {
    /// Create a new client with default settings
    pub fn new(credentials: Credentials) -> Result<Self> {
        CloudflareClientBuilder::new(credentials).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(credentials: Credentials) -> CloudflareClientBuilder {
        CloudflareClientBuilder::new(credentials)
    }

    /// Credentials this client tries, in order
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Access zone endpoints
    #[must_use]
    pub fn zones(&self) -> ZonesApi<'_> {
        ZonesApi::new(self)
    }

    /// Access DNS record endpoints
    #[must_use]
    pub fn dns_records(&self) -> DnsRecordsApi<'_> {
        DnsRecordsApi::new(self)
    }

    /// Perform a GET request with query parameters
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        auth: &AuthContext,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = self.build_url(path, params)?;
        debug!(url = %url, auth = %auth.label(), "GET request");

        let response = authorize(self.inner.http.get(url), auth)
            .send()
            .await
            .map_err(|e| HookError::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        auth: &AuthContext,
        path: &str,
        body: &B,
    ) -> Result<Option<T>> {
        let url = self.build_url(path, &[])?;
        debug!(url = %url, auth = %auth.label(), "POST request");

        let response = authorize(self.inner.http.post(url), auth)
            .json(body)
            .send()
            .await
            .map_err(|e| HookError::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Perform a DELETE request
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        auth: &AuthContext,
        path: &str,
    ) -> Result<Option<T>> {
        let url = self.build_url(path, &[])?;
        debug!(url = %url, auth = %auth.label(), "DELETE request");

        let response = authorize(self.inner.http.delete(url), auth)
            .send()
            .await
            .map_err(|e| HookError::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Build a URL with encoded query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.inner.base_url, path))
            .map_err(|e| HookError::InvalidUrl(format!("{}{path}: {e}", self.inner.base_url)))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    /// Unwrap the Cloudflare envelope of a response
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Option<T>> {
        let status = response.status();
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| HookError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), &url, &body));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(HookError::Api {
                code: status.as_u16(),
                message: envelope.error_summary(),
            });
        }

        Ok(envelope.result)
    }
}

/// Attach the headers of one credential to a request
fn authorize(request: RequestBuilder, auth: &AuthContext) -> RequestBuilder {
    auth.headers()
        .into_iter()
        .fold(request, |request, (name, value)| request.header(name, value))
}

/// Convert an error response to a [`HookError`]
fn error_for_status(status: u16, url: &str, body: &str) -> HookError {
    // Try to parse error message from the JSON envelope
    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .map(|envelope| envelope.error_summary())
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| body.to_string());

    if status == 429 {
        warn!("Rate limited by Cloudflare API");
    }

    match status {
        404 => HookError::NotFound {
            resource: url.to_string(),
        },
        _ => HookError::Api {
            code: status,
            message,
        },
    }
}

/// Builder for configuring a [`CloudflareClient`]
pub struct CloudflareClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl CloudflareClientBuilder {
    /// Create a new builder with the given credentials
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("flarehook/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CloudflareClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| HookError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(CloudflareClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.base_url,
                credentials: self.credentials,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flarehook_core::AuthMode;

    fn client(base: &str) -> CloudflareClient {
        let creds = Credentials::new(vec![AuthContext::bearer("t")], AuthMode::Token).unwrap();
        CloudflareClient::builder(creds).base_url(base).build().unwrap()
    }

    #[test]
    fn build_url_encodes_query() {
        let client = client("https://api.example.test/client/v4/");
        let url = client
            .build_url(
                "/zones/z1/dns_records",
                &[("type", "TXT"), ("content", "a+b/c=")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.test/client/v4/zones/z1/dns_records?type=TXT&content=a%2Bb%2Fc%3D"
        );
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let client = client("not a url");
        let err = client.build_url("/zones", &[]).unwrap_err();
        assert!(matches!(err, HookError::InvalidUrl(_)));
    }

    #[test]
    fn error_body_is_summarized() {
        let body = r#"{"success":false,"errors":[{"code":10000,"message":"Authentication error"}]}"#;
        match error_for_status(403, "https://x/zones", body) {
            HookError::Api { code, message } => {
                assert_eq!(code, 403);
                assert_eq!(message, "[10000] Authentication error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err = error_for_status(404, "https://x/zones", "");
        assert_eq!(err.status_code(), Some(404));
    }
}
