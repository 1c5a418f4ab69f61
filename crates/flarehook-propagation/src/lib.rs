//! DNS propagation checks for flarehook challenge records.
//!
//! The [`PropagationChecker`] asks either the system resolvers or an explicit
//! list of nameservers whether a TXT record already carries a token. Lookup
//! failures are reported as "not yet propagated"; retrying is up to the caller.

#![doc(html_root_url = "https://docs.rs/flarehook-propagation/0.3.0")]

mod checker;
mod error;

pub use checker::{
    parse_nameserver, parse_nameservers, records_contain_token, txt_contains_token,
    PropagationChecker, PropagationConfig,
};
pub use error::{PropagationError, PropagationResult};
