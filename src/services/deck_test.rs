use super::*;
use crate::net::api::VocabApi;
use crate::services::test_helpers::{FAKE_TODAY, FakeApi};
use time::macros::date;
use tokio::sync::Notify;

async fn seeded(today: &[&str], earlier: &[&str]) -> (Arc<FakeApi>, FlashcardDeck<FakeApi>) {
    let mut all = today.to_vec();
    all.extend_from_slice(earlier);
    let api = Arc::new(FakeApi::with_words(&all));
    for headword in today {
        api.add_word_to_flashcard(&api.word_id(headword), None)
            .await
            .unwrap();
    }
    for headword in earlier {
        api.add_word_to_flashcard(&api.word_id(headword), Some(date!(2024 - 04 - 30)))
            .await
            .unwrap();
    }
    (Arc::clone(&api), FlashcardDeck::new(api))
}

async fn current_headword(deck: &FlashcardDeck<FakeApi>) -> Option<String> {
    deck.state()
        .await
        .viewer
        .current_word()
        .map(|w| w.word.clone())
}

// =========================================================================
// fetch
// =========================================================================

#[tokio::test]
async fn load_without_today_leaves_viewer_empty() {
    let (api, deck) = seeded(&[], &[]).await;
    deck.load().await.unwrap();

    let state = deck.state().await;
    assert!(state.viewer.active().is_none());
    assert!(state.history.is_empty());
    assert!(!state.loading);
    drop(state);
    assert_eq!(api.count("today"), 1);
    assert_eq!(api.count("flashcards date="), 1);
}

#[tokio::test]
async fn load_reviews_today_and_lists_history() {
    let (_api, deck) = seeded(&["Abate", "Banal"], &["Cogent"]).await;
    deck.load().await.unwrap();

    let state = deck.state().await;
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.viewer.len(), 2);
    assert!(state.viewer.active().unwrap().date.starts_with(FAKE_TODAY));
    assert_eq!(state.viewer.progress().as_deref(), Some("Card 1 of 2"));
}

#[tokio::test]
async fn history_filter_is_applied_and_cleared() {
    let (api, deck) = seeded(&["Abate"], &["Cogent"]).await;
    deck.filter_by(Some(date!(2024 - 04 - 30))).await.unwrap();
    assert_eq!(deck.state().await.history.len(), 1);
    assert_eq!(api.calls().last().unwrap(), "flashcards date=2024-04-30");

    deck.clear_filter().await.unwrap();
    assert_eq!(deck.state().await.history.len(), 2);
    assert_eq!(api.calls().last().unwrap(), "flashcards date=");
}

#[tokio::test]
async fn failed_history_fetch_keeps_list() {
    let (api, deck) = seeded(&["Abate"], &[]).await;
    deck.fetch_history().await.unwrap();
    api.fail_next("flashcards", 500, None);

    assert!(deck.fetch_history().await.is_err());
    let state = deck.state().await;
    assert_eq!(state.history.len(), 1);
    assert!(!state.loading);
}

#[tokio::test]
async fn slow_history_fetch_does_not_overwrite_refetch_after_create() {
    let (api, deck) = seeded(&["Abate"], &[]).await;
    let gate = Arc::new(Notify::new());
    api.hold_next("flashcards", Arc::clone(&gate));

    let slow = tokio::spawn({
        let deck = deck.clone();
        async move { deck.fetch_history().await }
    });
    while api.count("flashcards") == 0 {
        tokio::task::yield_now().await;
    }

    deck.create(Some(date!(2024 - 06 - 01)), None).await.unwrap();
    assert_eq!(deck.state().await.history.len(), 2);

    gate.notify_one();
    slow.await.unwrap().unwrap();
    let state = deck.state().await;
    assert_eq!(state.history.len(), 2);
    assert!(!state.loading);
}

// =========================================================================
// review
// =========================================================================

#[tokio::test]
async fn selecting_history_entry_resets_review() {
    let (_api, deck) = seeded(&["Abate", "Banal"], &["Cogent"]).await;
    deck.load().await.unwrap();
    deck.next().await;
    deck.flip().await;

    let index = deck
        .state()
        .await
        .history
        .iter()
        .position(|f| f.date.starts_with("2024-04-30"))
        .unwrap();
    deck.select(index).await.unwrap();

    let state = deck.state().await;
    assert_eq!(state.viewer.position(), 0);
    assert!(!state.viewer.show_answer());
    assert_eq!(state.viewer.current_word().unwrap().word, "Cogent");
}

#[tokio::test]
async fn selecting_out_of_range_is_invalid() {
    let (_api, deck) = seeded(&[], &[]).await;
    assert!(matches!(deck.select(3).await, Err(ActionError::Invalid(_))));
}

#[tokio::test]
async fn navigation_wraps_and_hides_answer() {
    let (_api, deck) = seeded(&["Abate", "Banal", "Cogent"], &[]).await;
    deck.fetch_today().await.unwrap();

    deck.previous().await;
    assert_eq!(current_headword(&deck).await.as_deref(), Some("Cogent"));
    deck.flip().await;
    assert!(deck.state().await.viewer.show_answer());
    deck.next().await;
    assert_eq!(current_headword(&deck).await.as_deref(), Some("Abate"));
    assert!(!deck.state().await.viewer.show_answer());
}

// =========================================================================
// mutations
// =========================================================================

#[tokio::test]
async fn completing_active_card_refetches_both_views() {
    let (api, deck) = seeded(&["Abate"], &[]).await;
    deck.load().await.unwrap();

    deck.complete_active().await.unwrap();

    assert_eq!(api.count("today"), 2);
    assert_eq!(api.count("flashcards"), 2);
    let state = deck.state().await;
    assert!(state.viewer.active().unwrap().completed);
    assert!(state.history[0].completed);
}

#[tokio::test]
async fn completing_other_card_refetches_history_only() {
    let (api, deck) = seeded(&["Abate"], &["Cogent"]).await;
    deck.load().await.unwrap();
    let other = api
        .flashcards()
        .into_iter()
        .find(|f| f.date.starts_with("2024-04-30"))
        .unwrap();

    deck.complete(&other.id).await.unwrap();

    assert_eq!(api.count("today"), 1);
    assert_eq!(api.count("flashcards"), 2);
}

#[tokio::test]
async fn complete_without_active_card_is_invalid() {
    let (api, deck) = seeded(&[], &[]).await;
    assert!(matches!(deck.complete_active().await, Err(ActionError::Invalid(_))));
    assert_eq!(api.count("complete"), 0);
}

#[tokio::test]
async fn create_requires_a_date() {
    let (api, deck) = seeded(&[], &[]).await;
    assert!(matches!(deck.create(None, Some("Week 1")).await, Err(ActionError::Invalid(_))));
    assert!(api.calls().is_empty());

    deck.create(Some(date!(2024 - 06 - 01)), None).await.unwrap();
    let state = deck.state().await;
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].title.as_deref(), Some(""));
}

#[tokio::test]
async fn failed_create_does_not_refetch() {
    let (api, deck) = seeded(&["Abate"], &[]).await;
    let today = crate::net::types::parse_calendar_date(FAKE_TODAY);

    let err = deck.create(today, Some("dup")).await.unwrap_err();
    assert!(matches!(err, ActionError::Api(_)));
    assert_eq!(api.count("flashcards"), 0);
}

#[tokio::test]
async fn deleting_active_card_clears_review() {
    let (api, deck) = seeded(&["Abate"], &[]).await;
    deck.load().await.unwrap();
    let id = deck.state().await.viewer.active().unwrap().id.clone();

    deck.delete(&id).await.unwrap();

    assert!(api.flashcards().is_empty());
    let state = deck.state().await;
    assert!(state.viewer.active().is_none());
    assert!(state.history.is_empty());
}

#[tokio::test]
async fn removing_word_from_active_card_uses_its_date() {
    let (api, deck) = seeded(&["Abate", "Banal", "Cogent"], &[]).await;
    deck.fetch_today().await.unwrap();
    deck.previous().await;
    let cogent = api.word_id("Cogent");

    deck.remove_word_from_active(&cogent).await.unwrap();

    assert!(api.calls().contains(&format!("dissociate {cogent} {FAKE_TODAY}")));
    let state = deck.state().await;
    // Same card id: the cursor is clamped to the shorter list.
    assert_eq!(state.viewer.len(), 2);
    assert_eq!(state.viewer.position(), 1);
}

#[tokio::test]
async fn removing_word_by_history_date() {
    let (api, deck) = seeded(&["Abate"], &["Cogent"]).await;
    let cogent = api.word_id("Cogent");

    deck.remove_word(date!(2024 - 04 - 30), &cogent).await.unwrap();

    assert!(
        api.flashcards()
            .iter()
            .find(|f| f.date.starts_with("2024-04-30"))
            .unwrap()
            .words
            .is_empty()
    );
    assert_eq!(api.count("today"), 1);
}

#[tokio::test]
async fn remove_without_active_card_is_invalid() {
    let (api, deck) = seeded(&[], &[]).await;
    assert!(matches!(deck.remove_word_from_active("w1").await, Err(ActionError::Invalid(_))));
    assert_eq!(api.count("dissociate"), 0);
}
