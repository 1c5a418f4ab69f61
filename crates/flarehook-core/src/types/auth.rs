use std::fmt;

/// A single way of authenticating against the Cloudflare API
#[derive(Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Scoped API token sent as `Authorization: Bearer <token>`
    BearerToken(String),

    /// Legacy global API key sent as `X-Auth-Email` / `X-Auth-Key`
    EmailKey {
        /// Account email
        email: String,
        /// Global API key
        key: String,
    },
}

impl AuthContext {
    /// Create a bearer token context
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken(token.into())
    }

    /// Create an email/key context
    #[must_use]
    pub fn email_key(email: impl Into<String>, key: impl Into<String>) -> Self {
        Self::EmailKey {
            email: email.into(),
            key: key.into(),
        }
    }

    /// HTTP headers carrying this context
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::BearerToken(token) => vec![("Authorization", format!("Bearer {token}"))],
            Self::EmailKey { email, key } => vec![
                ("X-Auth-Email", email.clone()),
                ("X-Auth-Key", key.clone()),
            ],
        }
    }

    /// Short, secret-free label for log output
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::BearerToken(token) => format!("token …{}", tail(token)),
            Self::EmailKey { email, .. } => format!("key for {email}"),
        }
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BearerToken(_) => f.debug_tuple("BearerToken").field(&"<redacted>").finish(),
            Self::EmailKey { email, .. } => f
                .debug_struct("EmailKey")
                .field("email", email)
                .field("key", &"<redacted>")
                .finish(),
        }
    }
}

fn tail(secret: &str) -> &str {
    let start = secret
        .char_indices()
        .rev()
        .nth(3)
        .map_or(0, |(idx, _)| idx);
    &secret[start..]
}
