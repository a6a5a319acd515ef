//! Flashcard viewer flow: today's card, filterable history, review
//! navigation and flashcard mutations.
//!
//! The active card is the one under review. It starts as today's
//! flashcard and is replaced when a history entry is selected. Re-fetching
//! today replaces it again, keeping the cursor if the id is unchanged.
//!
//! Mutations re-fetch only when they succeed; failures are logged and
//! returned, never bannered.

use std::sync::Arc;

use time::Date;
use tokio::sync::{Mutex, MutexGuard};

use super::ActionError;
use crate::net::api::VocabApi;
use crate::net::types::{ApiError, Flashcard, NewFlashcard};
use crate::state::viewer::FlashcardViewer;

#[derive(Clone, Debug, Default)]
pub struct DeckState {
    pub history: Vec<Flashcard>,
    pub filter: Option<Date>,
    pub viewer: FlashcardViewer,
    pub loading: bool,
    history_seq: u64,
}

impl DeckState {
    fn active_id(&self) -> Option<&str> {
        self.viewer.active().map(|f| f.id.as_str())
    }
}

pub struct FlashcardDeck<A: VocabApi> {
    api: Arc<A>,
    state: Arc<Mutex<DeckState>>,
}

impl<A: VocabApi> Clone for FlashcardDeck<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api), state: Arc::clone(&self.state) }
    }
}

impl<A: VocabApi> FlashcardDeck<A> {
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self { api, state: Arc::new(Mutex::new(DeckState::default())) }
    }

    pub async fn state(&self) -> MutexGuard<'_, DeckState> {
        self.state.lock().await
    }

    // =========================================================================
    // FETCH
    // =========================================================================

    /// Fetch today's flashcard and the history list together.
    ///
    /// # Errors
    ///
    /// Returns the first failure; the other fetch still completes.
    pub async fn load(&self) -> Result<(), ApiError> {
        let (today, history) = tokio::join!(self.fetch_today(), self.fetch_history());
        today.and(history)
    }

    /// Re-fetch today's flashcard into the active slot.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the active card is left as it was.
    pub async fn fetch_today(&self) -> Result<(), ApiError> {
        match self.api.today_flashcard().await {
            Ok(flashcard) => {
                self.state.lock().await.viewer.refresh(flashcard);
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, "error fetching today's flashcard");
                Err(error)
            }
        }
    }

    /// Re-fetch the history list under the current date filter.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the list keeps its last good contents.
    pub async fn fetch_history(&self) -> Result<(), ApiError> {
        let (seq, filter) = {
            let mut state = self.state.lock().await;
            state.history_seq += 1;
            state.loading = true;
            (state.history_seq, state.filter)
        };

        let result = self.api.list_flashcards(filter).await;

        let mut state = self.state.lock().await;
        // Only the most recently issued fetch is applied.
        let latest = state.history_seq == seq;
        if latest {
            state.loading = false;
        }
        match result {
            Ok(history) => {
                if latest {
                    state.history = history;
                } else {
                    tracing::debug!(seq, "discarding stale flashcard history");
                }
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, "error fetching flashcards");
                Err(error)
            }
        }
    }

    /// Apply a date filter to the history list.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn filter_by(&self, date: Option<Date>) -> Result<(), ApiError> {
        self.state.lock().await.filter = date;
        self.fetch_history().await
    }

    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn clear_filter(&self) -> Result<(), ApiError> {
        self.filter_by(None).await
    }

    async fn refetch(&self, today: bool) {
        if let Err(error) = self.fetch_history().await {
            tracing::debug!(%error, "post-mutation history refresh failed");
        }
        if !today {
            return;
        }
        if let Err(error) = self.fetch_today().await {
            tracing::debug!(%error, "post-mutation today refresh failed");
        }
    }

    // =========================================================================
    // REVIEW
    // =========================================================================

    /// Make the history entry at `index` the card under review.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if `index` is out of range.
    pub async fn select(&self, index: usize) -> Result<(), ActionError> {
        let mut state = self.state.lock().await;
        let flashcard = state
            .history
            .get(index)
            .cloned()
            .ok_or(ActionError::Invalid("no flashcard at that position"))?;
        state.viewer.select(Some(flashcard));
        Ok(())
    }

    pub async fn next(&self) {
        self.state.lock().await.viewer.next();
    }

    pub async fn previous(&self) {
        self.state.lock().await.viewer.previous();
    }

    pub async fn flip(&self) {
        self.state.lock().await.viewer.toggle_answer();
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Mark a flashcard completed. One-way: there is no un-complete.
    ///
    /// # Errors
    ///
    /// Returns the API failure.
    pub async fn complete(&self, id: &str) -> Result<(), ActionError> {
        let shown = self.state.lock().await.active_id() == Some(id);
        match self.api.complete_flashcard(id).await {
            Ok(()) => {
                tracing::info!(%id, "flashcard completed");
                self.refetch(shown).await;
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, %id, "error marking as completed");
                Err(error.into())
            }
        }
    }

    /// Complete the card under review.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` with no active card, otherwise the API failure.
    pub async fn complete_active(&self) -> Result<(), ActionError> {
        let id = self.active_id().await?;
        self.complete(&id).await
    }

    /// Create a flashcard for `date`. The date is required; the title may
    /// be empty.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` without a date, otherwise the API failure.
    pub async fn create(&self, date: Option<Date>, title: Option<&str>) -> Result<(), ActionError> {
        let date = date.ok_or(ActionError::Invalid("date is required"))?;
        let body = NewFlashcard::new(date, title);
        match self.api.create_flashcard(&body).await {
            Ok(()) => {
                tracing::info!(date = %body.date, "flashcard created");
                self.refetch(false).await;
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, date = %body.date, "error creating flashcard");
                Err(error.into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns the API failure.
    pub async fn delete(&self, id: &str) -> Result<(), ActionError> {
        let shown = self.state.lock().await.active_id() == Some(id);
        match self.api.delete_flashcard(id).await {
            Ok(()) => {
                tracing::info!(%id, "flashcard deleted");
                self.refetch(shown).await;
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, %id, "error deleting flashcard");
                Err(error.into())
            }
        }
    }

    /// Remove a word from the flashcard dated `date`.
    ///
    /// # Errors
    ///
    /// Returns the API failure.
    pub async fn remove_word(&self, date: Date, word_id: &str) -> Result<(), ActionError> {
        match self
            .api
            .remove_word_from_flashcard(word_id, Some(date))
            .await
        {
            Ok(()) => {
                tracing::info!(%word_id, %date, "word removed from flashcard");
                self.refetch(true).await;
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, %word_id, "error removing word from flashcard");
                Err(error.into())
            }
        }
    }

    /// Remove a word from the card under review.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` with no active card or an unparseable card date,
    /// otherwise the API failure.
    pub async fn remove_word_from_active(&self, word_id: &str) -> Result<(), ActionError> {
        let date = {
            let state = self.state.lock().await;
            let flashcard = state
                .viewer
                .active()
                .ok_or(ActionError::Invalid("no active flashcard"))?;
            flashcard
                .calendar_date()
                .ok_or(ActionError::Invalid("flashcard has no valid date"))?
        };
        self.remove_word(date, word_id).await
    }

    async fn active_id(&self) -> Result<String, ActionError> {
        self.state
            .lock()
            .await
            .active_id()
            .map(ToOwned::to_owned)
            .ok_or(ActionError::Invalid("no active flashcard"))
    }
}

#[cfg(test)]
#[path = "deck_test.rs"]
mod tests;
