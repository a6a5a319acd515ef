//! # vocabulator
//!
//! Client library for a vocabulary-tracking API and a bulk-email endpoint.
//!
//! The crate holds three layers:
//! - `net`: typed wire types plus reqwest clients behind `VocabApi` and
//!   `MailTransport`.
//! - `state`: plain state machines for forms, filters, drafts and the
//!   flashcard viewer. No I/O.
//! - `services`: flows that tie state to the API. Every mutation re-fetches
//!   the affected list instead of patching local state.

pub mod config;
pub mod net;
pub mod services;
pub mod state;
