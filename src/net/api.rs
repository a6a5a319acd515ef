//! Transport-neutral API traits.
//!
//! Flows in `services` depend on these traits rather than on reqwest, so
//! they can run against the HTTP clients in production and in-memory fakes
//! in tests.

use async_trait::async_trait;
use time::Date;

use super::types::{ApiError, EmailJob, Flashcard, NewFlashcard, WordInput, WordPage, WordQuery};

/// Word and flashcard resources of the vocabulary API.
///
/// Mutations return `()`: callers re-fetch instead of trusting response
/// bodies.
#[async_trait]
pub trait VocabApi: Send + Sync {
    /// `GET /api/words?page&limit&search&date`
    async fn list_words(&self, query: &WordQuery) -> Result<WordPage, ApiError>;

    /// `POST /api/words` with a full record.
    async fn create_word(&self, input: &WordInput) -> Result<(), ApiError>;

    /// `POST /api/words` with `{word}` only.
    async fn quick_add_word(&self, word: &str) -> Result<(), ApiError>;

    /// `PATCH /api/words/:id` (full replace).
    async fn update_word(&self, id: &str, input: &WordInput) -> Result<(), ApiError>;

    /// `DELETE /api/words/:id`
    async fn delete_word(&self, id: &str) -> Result<(), ApiError>;

    /// `POST /api/words/:id/gemini`
    async fn enrich_word(&self, id: &str) -> Result<(), ApiError>;

    /// `POST /api/words/:id/flashcards`; `None` means the server's today.
    async fn add_word_to_flashcard(&self, id: &str, date: Option<Date>) -> Result<(), ApiError>;

    /// `DELETE /api/words/:id/flashcards`; `None` means the server's today.
    async fn remove_word_from_flashcard(&self, id: &str, date: Option<Date>) -> Result<(), ApiError>;

    /// `GET /api/flashcards/today`. `None` when no flashcard exists yet.
    async fn today_flashcard(&self) -> Result<Option<Flashcard>, ApiError>;

    /// `GET /api/flashcards?date`
    async fn list_flashcards(&self, date: Option<Date>) -> Result<Vec<Flashcard>, ApiError>;

    /// `POST /api/flashcards`
    async fn create_flashcard(&self, body: &NewFlashcard) -> Result<(), ApiError>;

    /// `PATCH /api/flashcards/:id/complete`
    async fn complete_flashcard(&self, id: &str) -> Result<(), ApiError>;

    /// `DELETE /api/flashcards/:id`
    async fn delete_flashcard(&self, id: &str) -> Result<(), ApiError>;
}

/// The bulk-email endpoint.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one job. Returns the server's `message`, if any.
    async fn send(&self, job: &EmailJob) -> Result<Option<String>, ApiError>;
}
