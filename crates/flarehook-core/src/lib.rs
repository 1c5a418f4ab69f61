//! Core types and traits for the flarehook DNS-01 hook.
//!
//! This crate provides the foundational types used across the flarehook crates:
//!
//! - **Types**: authentication contexts, challenge argument triples, zones and
//!   TXT records, plus the Cloudflare response envelope
//! - **Credentials**: resolution of [`Credentials`] from the process environment
//! - **Errors**: Comprehensive error handling with [`HookError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use flarehook_core::{ChallengeArgRecord, Credentials, Result};
//!
//! fn plan(args: &[String]) -> Result<()> {
//!     let credentials = Credentials::from_env()?;
//!     for record in ChallengeArgRecord::parse_batch(args)? {
//!         println!("{} via {} context(s)", record.record_name(), credentials.len());
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/flarehook-core/0.3.0")]

pub mod credentials;
mod error;
pub mod types;

pub use credentials::{AuthMode, Credentials};
pub use error::{HookError, Result};
pub use types::*;
