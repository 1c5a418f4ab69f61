use serde::{Deserialize, Serialize};

use super::AuthContext;

/// TTL, in seconds, of every challenge record
pub const CHALLENGE_TTL: u32 = 120;

/// Cloudflare zone (the management unit for a registrable domain)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier
    pub id: String,

    /// Zone name (registrable domain)
    #[serde(default)]
    pub name: String,
}

/// A zone together with the credential that can see it
#[derive(Debug, Clone)]
pub struct ZoneHandle<'a> {
    /// Credential that returned the zone
    pub auth: &'a AuthContext,
    /// The resolved zone
    pub zone: Zone,
}

/// DNS record as returned by the `dns_records` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtRecord {
    /// Provider-assigned record id
    pub id: String,

    /// Fully-qualified record name
    #[serde(default)]
    pub name: String,

    /// Record content
    #[serde(default)]
    pub content: String,

    /// TTL in seconds (1 means automatic)
    #[serde(default)]
    pub ttl: Option<u32>,
}

/// Body of a record creation request
#[derive(Debug, Clone, Serialize)]
pub struct NewTxtRecord<'a> {
    /// Always `TXT`
    #[serde(rename = "type")]
    pub record_type: &'static str,
    /// Fully-qualified record name
    pub name: &'a str,
    /// Token value
    pub content: &'a str,
    /// TTL in seconds
    pub ttl: u32,
}

impl<'a> NewTxtRecord<'a> {
    /// Challenge record with the fixed TTL
    #[must_use]
    pub const fn challenge(name: &'a str, content: &'a str) -> Self {
        Self {
            record_type: "TXT",
            name,
            content,
            ttl: CHALLENGE_TTL,
        }
    }
}

/// Record id as returned by create/delete
#[derive(Debug, Clone, Deserialize)]
pub struct RecordId {
    /// Provider-assigned id
    #[serde(default)]
    pub id: Option<String>,
}

/// Standard Cloudflare v4 response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded
    #[serde(default)]
    pub success: bool,

    /// Errors reported by the API
    #[serde(default)]
    pub errors: Vec<ApiMessage>,

    /// Payload
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Join all error messages into one line
    #[must_use]
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One entry of the `errors` / `messages` arrays
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    /// Cloudflare error code
    #[serde(default)]
    pub code: i64,
    /// Human readable message
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
