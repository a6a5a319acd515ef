//! Word dashboard flow: paginated list, create/edit modal, quick-add,
//! delete, enrichment and flashcard association.

use std::sync::Arc;

use time::Date;
use tokio::sync::{Mutex, MutexGuard};

use super::ActionError;
use crate::net::api::VocabApi;
use crate::net::types::{ApiError, WordInput};
use crate::state::draft::{ModalMode, WordModal};
use crate::state::notice::NoticeBoard;
use crate::state::word_list::{ListFetch, WordListState};

pub const WORD_ADDED: &str = "Word added successfully!";
pub const WORD_UPDATED: &str = "Word updated successfully!";
pub const WORD_DELETED: &str = "Word deleted successfully!";
pub const WORD_ENRICHED: &str = "AI meaning fetched successfully!";
pub const ADDED_TO_FLASHCARD: &str = "Word added to flashcard!";
pub const REMOVED_FROM_FLASHCARD: &str = "Word removed from flashcard!";

const ADD_FAILED: &str = "Error adding word";
const UPDATE_FAILED: &str = "Error updating word";
const DELETE_FAILED: &str = "Error deleting word";
const ADD_TO_FLASHCARD_FAILED: &str = "Error adding to flashcard";
const REMOVE_FROM_FLASHCARD_FAILED: &str = "Error removing from flashcard";

/// Everything the dashboard renders.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub list: WordListState,
    pub notices: NoticeBoard,
    pub modal: Option<WordModal>,
}

pub struct Dashboard<A: VocabApi> {
    api: Arc<A>,
    state: Arc<Mutex<DashboardState>>,
}

impl<A: VocabApi> Clone for Dashboard<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api), state: Arc::clone(&self.state) }
    }
}

impl<A: VocabApi> Dashboard<A> {
    #[must_use]
    pub fn new(api: Arc<A>, page_limit: u32) -> Self {
        let state = DashboardState { list: WordListState::new(page_limit), ..DashboardState::default() };
        Self { api, state: Arc::new(Mutex::new(state)) }
    }

    /// Lock the dashboard state for reading or direct edits.
    pub async fn state(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().await
    }

    // =========================================================================
    // LIST
    // =========================================================================

    /// Fetch if page, search or date changed since the last fetch.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the list keeps its last good contents.
    pub async fn sync(&self) -> Result<(), ApiError> {
        let fetch = self.state.lock().await.list.take_fetch();
        match fetch {
            Some(fetch) => self.fetch(fetch).await,
            None => Ok(()),
        }
    }

    /// Re-fetch the current page unconditionally.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the list keeps its last good contents.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let fetch = self.state.lock().await.list.begin_fetch();
        self.fetch(fetch).await
    }

    async fn fetch(&self, fetch: ListFetch) -> Result<(), ApiError> {
        let result = self.api.list_words(&fetch.query).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(page) => {
                if !state.list.apply_page(&fetch, page) {
                    tracing::debug!(seq = fetch.seq, page = fetch.query.page, "discarding stale word page");
                }
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, page = fetch.query.page, "error fetching words");
                state.list.fetch_failed(&fetch);
                Err(error)
            }
        }
    }

    /// Refresh after a mutation. The mutation's own outcome is what the
    /// caller sees, so a failed refresh is only logged.
    async fn refresh_after_mutation(&self) {
        // The second pass only fetches when the page shrank past its end.
        let result = match self.refresh().await {
            Ok(()) => self.sync().await,
            Err(error) => Err(error),
        };
        if let Err(error) = result {
            tracing::debug!(%error, "post-mutation refresh failed");
        }
    }

    /// # Errors
    ///
    /// Returns the fetch failure, if the term changed and the fetch failed.
    pub async fn search(&self, term: &str) -> Result<(), ApiError> {
        self.state.lock().await.list.set_search(term);
        self.sync().await
    }

    /// # Errors
    ///
    /// Returns the fetch failure, if the filter changed and the fetch failed.
    pub async fn filter_date(&self, date: Option<Date>) -> Result<(), ApiError> {
        self.state.lock().await.list.set_date(date);
        self.sync().await
    }

    /// # Errors
    ///
    /// Returns the fetch failure, if the page changed and the fetch failed.
    pub async fn go_to_page(&self, page: u32) -> Result<(), ApiError> {
        self.state.lock().await.list.set_page(page);
        self.sync().await
    }

    /// # Errors
    ///
    /// Returns the fetch failure, if there was a next page and it failed.
    pub async fn next_page(&self) -> Result<(), ApiError> {
        self.state.lock().await.list.next_page();
        self.sync().await
    }

    /// # Errors
    ///
    /// Returns the fetch failure, if there was a previous page and it failed.
    pub async fn prev_page(&self) -> Result<(), ApiError> {
        self.state.lock().await.list.prev_page();
        self.sync().await
    }

    // =========================================================================
    // MODAL
    // =========================================================================

    pub async fn open_create(&self) {
        self.state.lock().await.modal = Some(WordModal::create());
    }

    /// Open the edit modal on a copy of a listed word.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if the word is not on the current page.
    pub async fn open_edit(&self, id: &str) -> Result<(), ActionError> {
        let mut state = self.state.lock().await;
        let modal = state
            .list
            .find(id)
            .map(WordModal::edit)
            .ok_or(ActionError::Invalid("word is not on the current page"))?;
        state.modal = Some(modal);
        Ok(())
    }

    /// Open the edit modal on a caller-supplied draft for `id`.
    pub async fn open_edit_with(&self, id: &str, draft: WordInput) {
        let modal = WordModal { mode: ModalMode::Edit { id: id.to_owned() }, draft, error: None };
        self.state.lock().await.modal = Some(modal);
    }

    pub async fn close_modal(&self) {
        self.state.lock().await.modal = None;
    }

    /// Apply `edit` to the open draft. Returns `false` if no modal is open.
    pub async fn edit_draft(&self, edit: impl FnOnce(&mut WordInput)) -> bool {
        let mut state = self.state.lock().await;
        match state.modal.as_mut() {
            Some(modal) => {
                edit(&mut modal.draft);
                true
            }
            None => false,
        }
    }

    /// Submit the open modal: full create or full replace.
    ///
    /// On success the modal closes; on failure it stays open with the
    /// server's message. The list is re-fetched either way.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when no modal is open or the headword is empty,
    /// otherwise the API failure.
    pub async fn submit_modal(&self) -> Result<(), ActionError> {
        let (mode, draft) = {
            let mut state = self.state.lock().await;
            let modal = state
                .modal
                .as_mut()
                .ok_or(ActionError::Invalid("no word form is open"))?;
            if modal.draft.word.trim().is_empty() {
                modal.error = Some("Word is required".to_owned());
                return Err(ActionError::Invalid("word is required"));
            }
            modal.error = None;
            (modal.mode.clone(), modal.draft.clone())
        };

        let (result, success, fallback) = match &mode {
            ModalMode::Create => (self.api.create_word(&draft).await, WORD_ADDED, ADD_FAILED),
            ModalMode::Edit { id } => (self.api.update_word(id, &draft).await, WORD_UPDATED, UPDATE_FAILED),
        };

        {
            let mut state = self.state.lock().await;
            let still_open = state.modal.as_ref().is_some_and(|m| m.mode == mode);
            match &result {
                Ok(()) => {
                    tracing::info!(word = %draft.word, ?mode, "word saved");
                    if still_open {
                        state.modal = None;
                    }
                    state.notices.post_success(success);
                }
                Err(error) => {
                    let message = error.user_message(fallback);
                    tracing::warn!(%error, ?mode, "word save failed");
                    if let Some(modal) = state.modal.as_mut().filter(|_| still_open) {
                        modal.error = Some(message.clone());
                    }
                    state.notices.post_error(message);
                }
            }
        }

        self.refresh_after_mutation().await;
        result.map_err(ActionError::from)
    }

    // =========================================================================
    // ROW ACTIONS
    // =========================================================================

    /// Create a word from its headword alone.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a blank headword, otherwise the API failure.
    pub async fn quick_add(&self, word: &str) -> Result<(), ActionError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ActionError::Invalid("word is required"));
        }
        let result = self.api.quick_add_word(word).await;
        self.record(&result, &format!("Word \"{word}\" added successfully!"), ADD_FAILED)
            .await;
        self.refresh_after_mutation().await;
        result.map_err(ActionError::from)
    }

    /// # Errors
    ///
    /// Returns the API failure.
    pub async fn delete(&self, id: &str) -> Result<(), ActionError> {
        let result = self.api.delete_word(id).await;
        {
            let mut state = self.state.lock().await;
            match &result {
                Ok(()) => {
                    tracing::info!(%id, "word deleted");
                    state.notices.post_success(WORD_DELETED);
                }
                // The server's text is not surfaced for deletes.
                Err(error) => {
                    tracing::warn!(%error, %id, "delete failed");
                    state.notices.post_error(DELETE_FAILED);
                }
            }
        }
        self.refresh_after_mutation().await;
        result.map_err(ActionError::from)
    }

    /// Ask the server to enrich a word. Guarded per word id: a second call
    /// for the same id while the first is running is refused, other ids
    /// proceed.
    ///
    /// # Errors
    ///
    /// Returns `Busy` if this word is already being enriched, otherwise
    /// the API failure (which is logged, not bannered).
    pub async fn enrich(&self, id: &str) -> Result<(), ActionError> {
        if !self.state.lock().await.list.begin_enrich(id) {
            return Err(ActionError::Busy("enrichment"));
        }

        let result = self.api.enrich_word(id).await;

        {
            let mut state = self.state.lock().await;
            state.list.finish_enrich(id);
            match &result {
                Ok(()) => state.notices.post_success(WORD_ENRICHED),
                Err(error) => tracing::error!(%error, %id, "error fetching enrichment"),
            }
        }

        if result.is_ok() {
            self.refresh_after_mutation().await;
        }
        result.map_err(ActionError::from)
    }

    /// Add a word to today's flashcard.
    ///
    /// # Errors
    ///
    /// Returns the API failure.
    pub async fn add_to_today(&self, id: &str) -> Result<(), ActionError> {
        self.associate(id, None).await
    }

    /// Add a word to the flashcard for an explicit date. A missing date is
    /// refused locally.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` without a date, otherwise the API failure.
    pub async fn add_to_date(&self, id: &str, date: Option<Date>) -> Result<(), ActionError> {
        let date = date.ok_or(ActionError::Invalid("pick a date first"))?;
        self.associate(id, Some(date)).await
    }

    async fn associate(&self, id: &str, date: Option<Date>) -> Result<(), ActionError> {
        let result = self.api.add_word_to_flashcard(id, date).await;
        self.record(&result, ADDED_TO_FLASHCARD, ADD_TO_FLASHCARD_FAILED)
            .await;
        self.refresh_after_mutation().await;
        result.map_err(ActionError::from)
    }

    /// Remove a word from the flashcard for `date` (today when `None`).
    ///
    /// # Errors
    ///
    /// Returns the API failure.
    pub async fn remove_from_flashcard(&self, id: &str, date: Option<Date>) -> Result<(), ActionError> {
        let result = self.api.remove_word_from_flashcard(id, date).await;
        self.record(&result, REMOVED_FROM_FLASHCARD, REMOVE_FROM_FLASHCARD_FAILED)
            .await;
        self.refresh_after_mutation().await;
        result.map_err(ActionError::from)
    }

    /// Post the banner for a mutation outcome.
    async fn record(&self, result: &Result<(), ApiError>, success: &str, fallback: &str) {
        let mut state = self.state.lock().await;
        match result {
            Ok(()) => {
                tracing::info!(notice = success, "word action succeeded");
                state.notices.post_success(success);
            }
            Err(error) => {
                tracing::warn!(%error, "word action failed");
                state.notices.post_error(error.user_message(fallback));
            }
        }
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
