//! Flashcard review navigation.
//!
//! State is a cursor into the active flashcard's word list plus a
//! front/back flag. Next and previous wrap around and always hide the
//! answer. Switching to a different flashcard resets to the first card.

use crate::net::types::{Flashcard, Word};

#[derive(Clone, Debug, Default)]
pub struct FlashcardViewer {
    active: Option<Flashcard>,
    position: usize,
    show_answer: bool,
}

impl FlashcardViewer {
    #[must_use]
    pub fn active(&self) -> Option<&Flashcard> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.as_ref().map_or(0, |f| f.words.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make `flashcard` active and reset to the first card, answer hidden.
    pub fn select(&mut self, flashcard: Option<Flashcard>) {
        self.active = flashcard;
        self.position = 0;
        self.show_answer = false;
    }

    /// Replace the active flashcard with a re-fetched copy. A different id
    /// resets the cursor; the same id keeps it, clamped to the new length.
    pub fn refresh(&mut self, flashcard: Option<Flashcard>) {
        let same = match (&self.active, &flashcard) {
            (Some(old), Some(new)) => old.id == new.id,
            _ => false,
        };
        if !same {
            self.select(flashcard);
            return;
        }
        self.active = flashcard;
        let len = self.len();
        if self.position >= len {
            self.position = len.saturating_sub(1);
            self.show_answer = false;
        }
    }

    pub fn next(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        self.position = (self.position + 1) % len;
        self.show_answer = false;
    }

    pub fn previous(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        self.position = if self.position == 0 { len - 1 } else { self.position - 1 };
        self.show_answer = false;
    }

    /// Flip the card.
    pub fn toggle_answer(&mut self) {
        if !self.is_empty() {
            self.show_answer = !self.show_answer;
        }
    }

    /// The word under the cursor, if its record was populated.
    #[must_use]
    pub fn current_word(&self) -> Option<&Word> {
        self.active
            .as_ref()?
            .words
            .get(self.position)?
            .word
            .word()
    }

    /// "Card i of N", or `None` for an empty flashcard.
    #[must_use]
    pub fn progress(&self) -> Option<String> {
        let len = self.len();
        (len > 0).then(|| format!("Card {} of {len}", self.position + 1))
    }

    /// Text of the visible side of the current card.
    #[must_use]
    pub fn face(&self) -> Option<CardFace> {
        let word = self.current_word()?;
        if !self.show_answer {
            return Some(CardFace::Front { headword: word.word.clone() });
        }
        let user_meaning = if word.user_meaning.trim().is_empty() {
            "No meaning added".to_owned()
        } else {
            word.user_meaning.clone()
        };
        let translated = word
            .enrichment
            .as_ref()
            .and_then(|e| e.translated_meaning.clone())
            .filter(|m| !m.trim().is_empty());
        let actual = Some(word.details.actual_meaning.clone()).filter(|m| !m.trim().is_empty());
        Some(CardFace::Back { headword: word.word.clone(), user_meaning, translated, actual })
    }
}

/// One side of a review card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardFace {
    Front {
        headword: String,
    },
    Back {
        headword: String,
        user_meaning: String,
        translated: Option<String>,
        actual: Option<String>,
    },
}

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;
