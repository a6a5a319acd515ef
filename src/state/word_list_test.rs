use super::*;
use crate::net::types::Enrichment;
use time::macros::date;

fn word(id: &str) -> Word {
    Word {
        id: id.into(),
        word: format!("word-{id}"),
        user_meaning: String::new(),
        synonyms: Vec::new(),
        antonyms: Vec::new(),
        details: Default::default(),
        enrichment: None,
    }
}

fn page_of(ids: &[&str], current: u32, pages: u32) -> WordPage {
    WordPage {
        words: ids.iter().map(|id| word(id)).collect(),
        pagination: Pagination { current, pages, total: u64::from(pages) * 10 },
    }
}

fn loaded(pages: u32) -> WordListState {
    let mut state = WordListState::default();
    let q = state.take_fetch().unwrap();
    state.apply_page(&q, page_of(&["a"], 1, pages));
    state
}

// =============================================================
// Fetch coalescing
// =============================================================

#[test]
fn new_list_is_stale_and_fetches_first_page() {
    let mut state = WordListState::default();
    assert!(state.is_stale());
    let q = state.take_fetch().unwrap();
    assert_eq!(q.query, WordQuery { page: 1, limit: 10, search: None, date: None });
    assert!(state.loading());
    assert!(state.take_fetch().is_none());
}

#[test]
fn each_change_yields_exactly_one_fetch_with_latest_combination() {
    let mut state = loaded(5);

    assert!(state.set_search("acc"));
    assert!(state.set_date(Some(date!(2024 - 01 - 15))));
    assert!(state.set_page(3));

    let q = state.take_fetch().unwrap();
    assert_eq!(q.query.page, 3);
    assert_eq!(q.query.search.as_deref(), Some("acc"));
    assert_eq!(q.query.date, Some(date!(2024 - 01 - 15)));
    assert!(state.take_fetch().is_none());
}

#[test]
fn unchanged_values_do_not_mark_stale() {
    let mut state = loaded(5);
    assert!(!state.set_search(""));
    assert!(!state.set_date(None));
    assert!(!state.set_page(1));
    assert!(state.take_fetch().is_none());
}

#[test]
fn stale_response_is_ignored() {
    let mut state = loaded(5);
    state.set_search("ab");
    let old = state.take_fetch().unwrap();
    state.set_search("abate");
    let new = state.take_fetch().unwrap();

    assert!(state.apply_page(&new, page_of(&["abate"], 1, 1)));
    assert!(!state.apply_page(&old, page_of(&["ab1", "ab2"], 1, 1)));
    assert_eq!(state.words().len(), 1);
    assert_eq!(state.words()[0].id, "abate");
}

#[test]
fn failed_fetch_keeps_last_list() {
    let mut state = loaded(5);
    state.set_page(2);
    let q = state.take_fetch().unwrap();
    state.fetch_failed(&q);
    assert!(!state.loading());
    assert_eq!(state.words()[0].id, "a");
    assert_eq!(state.pagination().pages, 5);
}

#[test]
fn begin_fetch_refreshes_without_change() {
    let mut state = loaded(2);
    let q = state.begin_fetch();
    assert_eq!(q.query, state.query());
    assert!(state.loading());
}

#[test]
fn earlier_identical_fetch_cannot_overwrite_a_later_one() {
    let mut state = loaded(1);
    let before = state.begin_fetch();
    let after = state.begin_fetch();
    assert_eq!(before.query, after.query);

    assert!(state.apply_page(&after, page_of(&["a", "new"], 1, 1)));
    assert!(!state.apply_page(&before, page_of(&["a"], 1, 1)));
    let ids: Vec<&str> = state.words().iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["a", "new"]);
    assert!(!state.loading());
}

#[test]
fn failure_of_an_earlier_fetch_keeps_loading() {
    let mut state = loaded(1);
    let before = state.begin_fetch();
    let _after = state.begin_fetch();
    state.fetch_failed(&before);
    assert!(state.loading());
}

// =============================================================
// Pagination clamp
// =============================================================

#[test]
fn page_is_clamped_to_server_page_count() {
    let mut state = loaded(3);
    assert!(state.set_page(99));
    assert_eq!(state.page(), 3);
    assert!(!state.can_go_next());
    assert!(!state.next_page());

    assert!(state.set_page(0));
    assert_eq!(state.page(), 1);
    assert!(!state.can_go_prev());
    assert!(!state.prev_page());
}

#[test]
fn narrowing_search_follows_server_page() {
    let mut state = loaded(5);
    state.set_page(5);
    let q = state.take_fetch().unwrap();
    state.apply_page(&q, page_of(&["e"], 5, 5));
    assert_eq!(state.page(), 5);

    state.set_search("narrow");
    let q = state.take_fetch().unwrap();
    assert_eq!(q.query.page, 5);
    state.apply_page(&q, page_of(&["n"], 2, 2));

    assert_eq!(state.page(), 2);
    assert!(state.page() <= state.pagination().pages);
    assert!(state.can_go_prev());
    assert!(!state.can_go_next());
    assert!(!state.is_stale());
    assert_eq!(state.query().page, 2);
}

#[test]
fn page_past_the_end_is_clamped_and_refetched() {
    let mut state = loaded(5);
    state.set_page(4);
    let q = state.take_fetch().unwrap();
    state.apply_page(&q, page_of(&[], 4, 2));

    assert_eq!(state.page(), 2);
    assert!(state.is_stale());
    assert_eq!(state.take_fetch().unwrap().query.page, 2);
}

#[test]
fn page_moved_during_fetch_is_kept() {
    let mut state = loaded(5);
    let q = state.begin_fetch();
    state.set_page(3);
    state.apply_page(&q, page_of(&["a"], 1, 5));

    assert_eq!(state.page(), 3);
    assert_eq!(state.take_fetch().unwrap().query.page, 3);
}

#[test]
fn seek_skips_the_clamp_before_any_response() {
    let mut state = WordListState::default();
    assert!(state.seek(4));
    assert!(!state.seek(4));
    let q = state.take_fetch().unwrap();
    assert_eq!(q.query.page, 4);
    assert!(state.take_fetch().is_none());

    assert!(state.seek(0));
    assert_eq!(state.page(), 1);
}

#[test]
fn next_and_prev_walk_pages() {
    let mut state = loaded(3);
    assert!(state.next_page());
    assert!(state.next_page());
    assert_eq!(state.page(), 3);
    assert!(state.prev_page());
    assert_eq!(state.page(), 2);
    assert!(state.paginated());
}

#[test]
fn single_page_has_no_controls() {
    let mut state = loaded(1);
    assert!(!state.paginated());
    assert!(!state.next_page());
    let empty = {
        let q = state.begin_fetch();
        state.apply_page(&q, page_of(&[], 1, 0));
        state
    };
    assert!(!empty.can_go_next());
}

// =============================================================
// Enrich guard
// =============================================================

#[test]
fn enrich_guard_is_keyed_by_word() {
    let mut state = loaded(1);
    assert!(state.begin_enrich("a"));
    assert!(!state.begin_enrich("a"));
    assert!(state.begin_enrich("b"));
    assert!(state.is_enriching("a"));

    state.finish_enrich("a");
    assert!(!state.is_enriching("a"));
    assert!(state.is_enriching("b"));
}

#[test]
fn enriched_words_cannot_be_enriched_again() {
    let state = loaded(1);
    let mut w = word("x");
    assert!(state.can_enrich(&w));
    w.enrichment = Some(Enrichment { fetched_at: Some("2024-01-01T00:00:00Z".into()), ..Default::default() });
    assert!(!state.can_enrich(&w));
}
