use thiserror::Error;

/// Result type alias for propagation checks
pub type PropagationResult<T> = std::result::Result<T, PropagationError>;

/// Errors from setting up propagation checks
#[derive(Error, Debug)]
pub enum PropagationError {
    /// Nameserver entry is neither `ip` nor `ip:port`
    #[error("invalid nameserver address: {0}")]
    InvalidNameserver(String),

    /// Resolver could not be built
    #[error("resolver error: {0}")]
    Resolver(String),
}

impl From<PropagationError> for flarehook_core::HookError {
    fn from(err: PropagationError) -> Self {
        match err {
            PropagationError::InvalidNameserver(addr) => {
                Self::Config(format!("invalid nameserver address in CF_DNS_SERVERS: {addr}"))
            }
            PropagationError::Resolver(msg) => Self::Dns(msg),
        }
    }
}
