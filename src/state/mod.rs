//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by flow (composer, word list, drafts, flashcard viewer)
//! so each flow depends on a small, I/O-free model. Services own the
//! network calls and feed their outcomes back into these models.

pub mod composer;
pub mod draft;
pub mod notice;
pub mod viewer;
pub mod word_list;
