//! HTTP client for the Cloudflare v4 DNS API.
//!
//! This crate provides the [`CloudflareClient`] used to publish and remove
//! DNS-01 challenge records. Every call is tried with the configured
//! credentials in order until one of them can see the zone.

#![doc(html_root_url = "https://docs.rs/flarehook-client/0.3.0")]

mod challenge;
mod client;
pub mod api;

pub use api::registrable_domain;
pub use client::{CloudflareClient, CloudflareClientBuilder, DEFAULT_BASE_URL};
pub use flarehook_core::{HookError, Result};
