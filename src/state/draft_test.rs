use super::*;
use crate::net::types::Enrichment;

const KINDS: [SlotKind; 4] = [SlotKind::Synonym, SlotKind::Antonym, SlotKind::Sentence, SlotKind::Substitute];

fn listed_word() -> Word {
    Word {
        id: "w1".into(),
        word: "Abate".into(),
        user_meaning: "to lessen".into(),
        synonyms: vec![RelatedWord { word: "subside".into(), meaning: "ease".into() }],
        antonyms: Vec::new(),
        details: WordDetails {
            actual_meaning: "become less intense".into(),
            sentences: vec!["The storm abated.".into()],
            one_word_substitutes: Vec::new(),
        },
        enrichment: Some(Enrichment::default()),
    }
}

#[test]
fn blank_draft_has_one_slot_each() {
    let draft = blank_draft();
    for kind in KINDS {
        assert_eq!(slot_count(&draft, kind), 1, "{kind:?}");
        assert!(!can_remove_slot(&draft, kind));
    }
}

#[test]
fn sub_list_never_drops_below_one_slot() {
    for kind in KINDS {
        let mut draft = blank_draft();
        add_slot(&mut draft, kind);
        add_slot(&mut draft, kind);
        assert_eq!(slot_count(&draft, kind), 3);

        // Try to remove every row in sequence.
        let removed = (0..3).filter(|_| remove_slot(&mut draft, kind, 0)).count();
        assert_eq!(removed, 2, "{kind:?}");
        assert_eq!(slot_count(&draft, kind), 1, "{kind:?}");
    }
}

#[test]
fn remove_out_of_range_is_refused() {
    let mut draft = blank_draft();
    add_slot(&mut draft, SlotKind::Sentence);
    assert!(!remove_slot(&mut draft, SlotKind::Sentence, 5));
    assert_eq!(slot_count(&draft, SlotKind::Sentence), 2);
}

#[test]
fn remove_takes_the_indexed_row() {
    let mut draft = blank_draft();
    add_slot(&mut draft, SlotKind::Synonym);
    set_pair(&mut draft, SlotKind::Synonym, 0, "first", "");
    set_pair(&mut draft, SlotKind::Synonym, 1, "second", "");
    assert!(remove_slot(&mut draft, SlotKind::Synonym, 0));
    assert_eq!(draft.synonyms[0].word, "second");
}

#[test]
fn slot_kinds_only_touch_their_own_list() {
    let mut draft = blank_draft();
    add_slot(&mut draft, SlotKind::Antonym);
    assert_eq!(slot_count(&draft, SlotKind::Antonym), 2);
    assert_eq!(slot_count(&draft, SlotKind::Synonym), 1);
    assert_eq!(slot_count(&draft, SlotKind::Sentence), 1);
}

#[test]
fn setters_reject_wrong_kind_and_range() {
    let mut draft = blank_draft();
    assert!(set_pair(&mut draft, SlotKind::Antonym, 0, "calm", "peaceful"));
    assert_eq!(draft.antonyms[0], RelatedWord { word: "calm".into(), meaning: "peaceful".into() });
    assert!(!set_pair(&mut draft, SlotKind::Sentence, 0, "x", "y"));
    assert!(!set_pair(&mut draft, SlotKind::Synonym, 4, "x", "y"));

    assert!(set_text(&mut draft, SlotKind::Substitute, 0, "diminish"));
    assert_eq!(draft.details.one_word_substitutes, vec!["diminish"]);
    assert!(!set_text(&mut draft, SlotKind::Synonym, 0, "x"));
}

#[test]
fn edit_draft_is_a_padded_copy() {
    let word = listed_word();
    let modal = WordModal::edit(&word);

    assert_eq!(modal.editing_id(), Some("w1"));
    assert_eq!(modal.title(), "Edit Word");
    assert_eq!(modal.draft.word, "Abate");
    assert_eq!(modal.draft.synonyms, word.synonyms);
    assert_eq!(modal.draft.antonyms, vec![RelatedWord::default()]);
    assert_eq!(modal.draft.details.one_word_substitutes, vec![String::new()]);
}

#[test]
fn editing_draft_leaves_listed_record_untouched() {
    let word = listed_word();
    let mut modal = WordModal::edit(&word);
    add_slot(&mut modal.draft, SlotKind::Synonym);
    modal.draft.user_meaning = "changed".into();

    assert_eq!(word.synonyms.len(), 1);
    assert_eq!(word.user_meaning, "to lessen");
}

#[test]
fn create_modal_starts_blank() {
    let modal = WordModal::create();
    assert_eq!(modal.mode, ModalMode::Create);
    assert_eq!(modal.draft, blank_draft());
    assert!(modal.editing_id().is_none());
    assert_eq!(modal.title(), "Add New Word");
}
