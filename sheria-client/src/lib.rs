mod auth;
mod client;
pub mod domain;
mod method;
pub mod mock;
mod sheria_url;
mod transport;

pub(crate) use sheria_url::*;

pub use auth::*;
pub use client::*;
pub use method::*;
pub use transport::*;
