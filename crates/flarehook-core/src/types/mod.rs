mod auth;
mod challenge;
mod record;

pub use auth::*;
pub use challenge::*;
pub use record::*;
