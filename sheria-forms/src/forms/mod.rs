//! One handler per document type.

mod client;
mod hearing;
mod service_request;
mod task;
mod time_entry;
mod trust_transaction;

pub use client::*;
pub use hearing::*;
pub use service_request::*;
pub use task::*;
pub use time_entry::*;
pub use trust_transaction::*;
