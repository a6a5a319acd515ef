//! Flows that connect state models to the API.
//!
//! DESIGN
//! ======
//! Each flow is a cheap-to-clone handle holding the transport (`Arc<A>`)
//! and its state behind a `tokio::sync::Mutex`. The lock is never held
//! across a network await, so overlapping calls run concurrently and the
//! only serialization comes from explicit in-flight guards (composer
//! submit, per-word enrich).
//!
//! Local state is never patched optimistically: mutations re-fetch the
//! affected lists instead. Dashboard mutations re-fetch whatever the
//! outcome (enrich only on success); flashcard mutations only on success.

pub mod composer;
pub mod dashboard;
pub mod deck;

use crate::net::types::ApiError;
use crate::state::composer::ComposeError;

pub use composer::Composer;
pub use dashboard::Dashboard;
pub use deck::FlashcardDeck;

#[cfg(test)]
#[path = "fake_api_test.rs"]
pub(crate) mod test_helpers;

/// Failure of a user-initiated action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Local validation failed; nothing was sent.
    #[error("{0}")]
    Invalid(&'static str),

    /// The same action is already in flight for this target.
    #[error("{0} already in progress")]
    Busy(&'static str),

    /// Composer validation failed; nothing was sent.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The call reached the network and failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
