//! API endpoint modules.

mod dns_records;
mod zones;

pub use dns_records::DnsRecordsApi;
pub use zones::{registrable_domain, ZonesApi};
