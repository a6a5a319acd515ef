//! Word list filter, pagination and fetch bookkeeping.
//!
//! Page, search term and date filter together form the list query. Any
//! change marks the list stale; [`WordListState::take_fetch`] hands out one
//! query for the latest combination no matter how many changes piled up.
//! Every issued fetch carries a sequence number and only the latest one is
//! applied, so a slow stale response cannot overwrite a newer page even
//! when both asked for the same query.

use std::collections::HashSet;

use time::Date;

use crate::config::DEFAULT_PAGE_LIMIT;
use crate::net::types::{Pagination, Word, WordPage, WordQuery};

/// An issued list fetch: the query to send and its sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListFetch {
    pub seq: u64,
    pub query: WordQuery,
}

#[derive(Clone, Debug)]
pub struct WordListState {
    page: u32,
    search: String,
    date: Option<Date>,
    limit: u32,
    words: Vec<Word>,
    pagination: Pagination,
    loading: bool,
    stale: bool,
    issued: u64,
    requested: Option<u64>,
    enriching: HashSet<String>,
}

impl Default for WordListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

impl WordListState {
    /// A fresh list. It starts stale so the first sync fetches page 1.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            search: String::new(),
            date: None,
            limit: limit.max(1),
            words: Vec::new(),
            pagination: Pagination::default(),
            loading: false,
            stale: true,
            issued: 0,
            requested: None,
            enriching: HashSet::new(),
        }
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    /// The query for the current page/search/date combination.
    #[must_use]
    pub fn query(&self) -> WordQuery {
        WordQuery {
            page: self.page,
            limit: self.limit,
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            date: self.date,
        }
    }

    // =========================================================================
    // FILTERS
    // =========================================================================

    /// Returns `true` if the term changed.
    pub fn set_search(&mut self, term: &str) -> bool {
        if self.search == term {
            return false;
        }
        term.clone_into(&mut self.search);
        self.stale = true;
        true
    }

    /// Returns `true` if the filter changed.
    pub fn set_date(&mut self, date: Option<Date>) -> bool {
        if self.date == date {
            return false;
        }
        self.date = date;
        self.stale = true;
        true
    }

    // =========================================================================
    // PAGINATION
    // =========================================================================

    fn last_page(&self) -> u32 {
        self.pagination.pages.max(1)
    }

    /// Jump to `page`, clamped to `[1, pages]`. Returns `true` if the page
    /// changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let clamped = page.clamp(1, self.last_page());
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        self.stale = true;
        true
    }

    /// Jump to `page` without clamping, for a first fetch before the page
    /// count is known. The response reconciles it.
    pub fn seek(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        self.stale = true;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.page < self.last_page()
    }

    /// Whether pagination controls are shown at all.
    #[must_use]
    pub fn paginated(&self) -> bool {
        self.pagination.pages > 1
    }

    // =========================================================================
    // FETCH LIFECYCLE
    // =========================================================================

    /// Take the pending fetch, if the list is stale.
    pub fn take_fetch(&mut self) -> Option<ListFetch> {
        if !self.stale {
            return None;
        }
        Some(self.begin_fetch())
    }

    /// Issue a fetch for the current query regardless of staleness, as
    /// after a mutation.
    pub fn begin_fetch(&mut self) -> ListFetch {
        self.issued += 1;
        self.stale = false;
        self.loading = true;
        self.requested = Some(self.issued);
        ListFetch { seq: self.issued, query: self.query() }
    }

    fn is_latest(&self, fetch: &ListFetch) -> bool {
        self.requested == Some(fetch.seq)
    }

    /// Apply a response. Ignored (returns `false`) if `fetch` is no longer
    /// the latest issued request.
    ///
    /// The server's pagination wins: the local page follows `current`,
    /// clamped to the page count, unless the page was moved locally while
    /// the fetch was out. If the server answered a page past the end, the
    /// list goes stale so the next sync fetches the last real page.
    pub fn apply_page(&mut self, fetch: &ListFetch, page: WordPage) -> bool {
        if !self.is_latest(fetch) {
            return false;
        }
        self.words = page.words;
        self.pagination = page.pagination;
        self.loading = false;
        if self.page == fetch.query.page {
            let current = self.pagination.current.max(1);
            self.page = current.min(self.last_page());
            if current > self.page {
                self.stale = true;
            }
        }
        true
    }

    /// A fetch failed: keep the last good list.
    pub fn fetch_failed(&mut self, fetch: &ListFetch) {
        if self.is_latest(fetch) {
            self.loading = false;
        }
    }

    // =========================================================================
    // ENRICH GUARD
    // =========================================================================

    /// Mark an enrich call for `id` as in flight. Returns `false` if one is
    /// already running for that id; other ids are unaffected.
    pub fn begin_enrich(&mut self, id: &str) -> bool {
        self.enriching.insert(id.to_owned())
    }

    pub fn finish_enrich(&mut self, id: &str) {
        self.enriching.remove(id);
    }

    #[must_use]
    pub fn is_enriching(&self, id: &str) -> bool {
        self.enriching.contains(id)
    }

    /// The enrich action is offered for unenriched words not already busy.
    #[must_use]
    pub fn can_enrich(&self, word: &Word) -> bool {
        !word.is_enriched() && !self.is_enriching(&word.id)
    }
}

#[cfg(test)]
#[path = "word_list_test.rs"]
mod word_list_test;
