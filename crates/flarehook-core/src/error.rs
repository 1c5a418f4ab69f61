use thiserror::Error;

/// Result type alias for flarehook operations
pub type Result<T> = std::result::Result<T, HookError>;

/// Errors that can occur while running a hook operation
#[derive(Error, Debug)]
pub enum HookError {
    /// Neither `CF_API_TOKEN` nor `CF_EMAIL`/`CF_KEY` produced a usable credential
    #[error("no Cloudflare credentials found in environment; set CF_API_TOKEN")]
    NoCredentials,

    /// None of the API tokens can see the zone
    #[error("none of the provided API tokens have the required permissions for the domain {zone}")]
    ZonePermission {
        /// Registrable domain that was looked up
        zone: String,
    },

    /// The zone does not exist in any account reachable with email/key auth
    #[error("domain {zone} not found in any Cloudflare account")]
    ZoneNotFound {
        /// Registrable domain that was looked up
        zone: String,
    },

    /// The domain has no registrable part under the public suffix list
    #[error("cannot determine registrable domain for {0:?}")]
    InvalidDomain(String),

    /// Resource not found (HTTP 404)
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error status or `success: false`
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message(s) from the API
        message: String,
    },

    /// Record creation succeeded but the response carried no id
    #[error("create response for {name} did not include a record id")]
    MissingRecordId {
        /// Record name that was created
        name: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Hook arguments have the wrong shape
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// DNS resolver could not be constructed
    #[error("DNS resolver error: {0}")]
    Dns(String),

    /// Record did not propagate before the configured deadline
    #[error("TXT record {record} not propagated after {waited_secs} seconds")]
    PropagationTimeout {
        /// Record name being polled
        record: String,
        /// Seconds spent polling
        waited_secs: u64,
    },
}

impl HookError {
    /// Returns true if the error is detected before any network call
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::NoCredentials | Self::Config(_) | Self::InvalidArguments(_) | Self::InvalidUrl(_)
        )
    }

    /// Returns true if the error comes from zone resolution
    #[must_use]
    pub const fn is_zone_error(&self) -> bool {
        matches!(
            self,
            Self::ZonePermission { .. } | Self::ZoneNotFound { .. } | Self::InvalidDomain(_)
        )
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
