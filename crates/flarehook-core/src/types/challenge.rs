use crate::error::{HookError, Result};

/// Label prepended to a domain to form its DNS-01 record name
pub const ACME_CHALLENGE_LABEL: &str = "_acme-challenge";

/// Number of arguments per domain in `deploy_challenge` / `clean_challenge`
pub const CHALLENGE_ARITY: usize = 3;

/// Build the TXT record name for a domain
///
/// The domain is used verbatim, so `*.example.com` is not normalized.
#[must_use]
pub fn challenge_record_name(domain: &str) -> String {
    format!("{ACME_CHALLENGE_LABEL}.{domain}")
}

/// One `(domain, validation_payload, token)` triple handed over by the ACME client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeArgRecord {
    /// Domain being validated
    pub domain: String,
    /// HTTP-01 style payload; only logged
    pub validation_payload: String,
    /// Value the TXT record must carry
    pub token: String,
}

impl ChallengeArgRecord {
    /// Create a record from its parts
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        validation_payload: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            validation_payload: validation_payload.into(),
            token: token.into(),
        }
    }

    /// Split a flat argument list into triples, preserving order
    pub fn parse_batch<S: AsRef<str>>(args: &[S]) -> Result<Vec<Self>> {
        if args.len() % CHALLENGE_ARITY != 0 {
            return Err(HookError::InvalidArguments(format!(
                "expected (domain, payload, token) triples, got {} argument(s)",
                args.len()
            )));
        }

        Ok(args
            .chunks_exact(CHALLENGE_ARITY)
            .map(|chunk| {
                Self::new(chunk[0].as_ref(), chunk[1].as_ref(), chunk[2].as_ref())
            })
            .collect())
    }

    /// `_acme-challenge.<domain>`
    #[must_use]
    pub fn record_name(&self) -> String {
        challenge_record_name(&self.domain)
    }
}
