//! Word drafts and the shared create/edit modal.
//!
//! A draft is a [`WordInput`] owned by the modal. Editing seeds the draft
//! from a copy of the listed record, so the list keeps showing the
//! committed version until the server acknowledges the change and the list
//! is re-fetched.
//!
//! Slot edits are free functions over an explicit draft. Every sub-list
//! keeps at least one slot: removing the last one is refused.

use crate::net::types::{RelatedWord, Word, WordDetails, WordInput};

/// The dynamic-length sub-lists of a draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Synonym,
    Antonym,
    Sentence,
    Substitute,
}

/// A blank draft with one empty slot per sub-list.
#[must_use]
pub fn blank_draft() -> WordInput {
    WordInput {
        word: String::new(),
        user_meaning: String::new(),
        synonyms: vec![RelatedWord::default()],
        antonyms: vec![RelatedWord::default()],
        details: WordDetails {
            actual_meaning: String::new(),
            sentences: vec![String::new()],
            one_word_substitutes: vec![String::new()],
        },
    }
}

/// Copy a listed record into an editable draft, padding empty sub-lists
/// with one blank slot.
#[must_use]
pub fn draft_from_word(word: &Word) -> WordInput {
    let mut draft = WordInput {
        word: word.word.clone(),
        user_meaning: word.user_meaning.clone(),
        synonyms: word.synonyms.clone(),
        antonyms: word.antonyms.clone(),
        details: word.details.clone(),
    };
    for kind in [SlotKind::Synonym, SlotKind::Antonym, SlotKind::Sentence, SlotKind::Substitute] {
        if slot_count(&draft, kind) == 0 {
            add_slot(&mut draft, kind);
        }
    }
    draft
}

#[must_use]
pub fn slot_count(draft: &WordInput, kind: SlotKind) -> usize {
    match kind {
        SlotKind::Synonym => draft.synonyms.len(),
        SlotKind::Antonym => draft.antonyms.len(),
        SlotKind::Sentence => draft.details.sentences.len(),
        SlotKind::Substitute => draft.details.one_word_substitutes.len(),
    }
}

/// Whether the remove control is offered for `kind`.
#[must_use]
pub fn can_remove_slot(draft: &WordInput, kind: SlotKind) -> bool {
    slot_count(draft, kind) > 1
}

/// Append an empty slot.
pub fn add_slot(draft: &mut WordInput, kind: SlotKind) {
    match kind {
        SlotKind::Synonym => draft.synonyms.push(RelatedWord::default()),
        SlotKind::Antonym => draft.antonyms.push(RelatedWord::default()),
        SlotKind::Sentence => draft.details.sentences.push(String::new()),
        SlotKind::Substitute => draft
            .details
            .one_word_substitutes
            .push(String::new()),
    }
}

/// Remove the slot at `index`. Refused (returns `false`) when it is the
/// only slot left or `index` is out of range.
pub fn remove_slot(draft: &mut WordInput, kind: SlotKind, index: usize) -> bool {
    if !can_remove_slot(draft, kind) || index >= slot_count(draft, kind) {
        return false;
    }
    match kind {
        SlotKind::Synonym => {
            draft.synonyms.remove(index);
        }
        SlotKind::Antonym => {
            draft.antonyms.remove(index);
        }
        SlotKind::Sentence => {
            draft.details.sentences.remove(index);
        }
        SlotKind::Substitute => {
            draft.details.one_word_substitutes.remove(index);
        }
    }
    true
}

/// Set a synonym/antonym slot. Returns `false` for text-only kinds or an
/// out-of-range index.
pub fn set_pair(draft: &mut WordInput, kind: SlotKind, index: usize, word: &str, meaning: &str) -> bool {
    let list = match kind {
        SlotKind::Synonym => &mut draft.synonyms,
        SlotKind::Antonym => &mut draft.antonyms,
        SlotKind::Sentence | SlotKind::Substitute => return false,
    };
    let Some(slot) = list.get_mut(index) else {
        return false;
    };
    word.clone_into(&mut slot.word);
    meaning.clone_into(&mut slot.meaning);
    true
}

/// Set a sentence/substitute slot. Returns `false` for pair kinds or an
/// out-of-range index.
pub fn set_text(draft: &mut WordInput, kind: SlotKind, index: usize, text: &str) -> bool {
    let list = match kind {
        SlotKind::Sentence => &mut draft.details.sentences,
        SlotKind::Substitute => &mut draft.details.one_word_substitutes,
        SlotKind::Synonym | SlotKind::Antonym => return false,
    };
    let Some(slot) = list.get_mut(index) else {
        return false;
    };
    text.clone_into(slot);
    true
}

// =============================================================================
// MODAL
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit { id: String },
}

/// The create/edit modal: a mode, a draft and the last submit error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordModal {
    pub mode: ModalMode,
    pub draft: WordInput,
    pub error: Option<String>,
}

impl WordModal {
    #[must_use]
    pub fn create() -> Self {
        Self { mode: ModalMode::Create, draft: blank_draft(), error: None }
    }

    #[must_use]
    pub fn edit(word: &Word) -> Self {
        Self { mode: ModalMode::Edit { id: word.id.clone() }, draft: draft_from_word(word), error: None }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.mode {
            ModalMode::Create => "Add New Word",
            ModalMode::Edit { .. } => "Edit Word",
        }
    }

    /// The id being edited, if this is an edit modal.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            ModalMode::Create => None,
            ModalMode::Edit { id } => Some(id),
        }
    }
}

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;
