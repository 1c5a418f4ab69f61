//! # flarehook-cli
//!
//! Hook binary for dehydrated-style ACME clients.
//!
//! ## Features
//!
//! - **DNS-01 challenges**: `deploy_challenge` / `clean_challenge` publish and
//!   remove `_acme-challenge` TXT records through the Cloudflare API
//! - **Propagation wait**: blocks until every record is visible in DNS
//! - **Lifecycle hooks**: `deploy_cert`, `invalid_challenge` and friends are logged
//! - **Environment configuration**: `CF_API_TOKEN`, `CF_DNS_SERVERS`, `CF_SETTLE_TIME`, ...

pub mod cli;
pub mod config;
pub mod logging;

pub use cli::run;
