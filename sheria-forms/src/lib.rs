//! Form rules for sheria documents.
//!
//! The pure rules (billing, task sync, date checks, validation, currency) sit
//! at the top level. [`forms`] binds them to document types through
//! [`FormHandler`]s that describe their work as [`Effect`]s, and
//! [`FormSession`] runs those effects against a [`SheriaClient`].
//!
//! [`SheriaClient`]: sheria_client::SheriaClient

pub mod billing;
pub mod dashboard;
pub mod dates;
mod effect;
pub mod forms;
mod handler;
pub mod money;
pub mod progress;
mod session;
mod statement;
pub mod validation;
mod value;
pub mod website;

pub use effect::*;
pub use handler::*;
pub use session::*;
pub use statement::*;
pub use value::*;
