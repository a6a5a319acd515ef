//! Network layer: wire types, API traits and their reqwest implementations.

pub mod api;
pub mod client;
pub mod mailer;
pub mod types;

pub use api::{MailTransport, VocabApi};
pub use client::ApiClient;
pub use mailer::MailClient;
pub use types::ApiError;
