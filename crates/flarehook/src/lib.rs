//! Cloudflare DNS-01 hook for dehydrated-style ACME clients.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use flarehook::{
//!     ChallengeArgRecord, ChallengeOrchestrator, CloudflareClient, Credentials, PollConfig,
//!     PropagationChecker,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> flarehook::Result<()> {
//!     let client = CloudflareClient::new(Credentials::from_env()?)?;
//!     let checker = PropagationChecker::system()?;
//!     let orchestrator = ChallengeOrchestrator::new(client, checker, PollConfig::default());
//!
//!     let batch = ChallengeArgRecord::parse_batch(&["example.com", "payload", "token"])?;
//!     orchestrator.create_all(&batch).await?;
//!     orchestrator.delete_all(&batch).await
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/flarehook/0.3.0")]

mod config;
pub mod notify;
mod orchestrator;

pub use config::PollConfig;
pub use orchestrator::{delete_all, ChallengeOrchestrator, PropagationProbe, RecordManager};

// Re-export core types
pub use flarehook_core::*;

// Re-export client and propagation checks
pub use flarehook_client::{registrable_domain, CloudflareClient, CloudflareClientBuilder};
pub use flarehook_propagation::{parse_nameservers, PropagationChecker, PropagationConfig};

// Re-export runtime for convenience
pub use tokio;
