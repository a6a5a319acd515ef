//! Wire types for the word, flashcard and email endpoints.
//!
//! Records mirror the remote API's JSON shapes (camelCase keys, `_id`
//! identifiers). The client never holds authoritative copies; everything
//! here is re-fetched after each mutation.

use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API and mailer calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, body read),
    /// or the HTTP client could not be constructed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// The server-reported `message`, if the failure carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message: Some(message), .. } => Some(message),
            _ => None,
        }
    }

    /// Message suitable for a banner: the server's text verbatim when
    /// present, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

// =============================================================================
// DATES
// =============================================================================

/// Format a calendar date the way the API expects it (`YYYY-MM-DD`).
#[must_use]
pub fn format_date(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    // Calendar dates always format with this description.
    date.format(&format).unwrap_or_default()
}

/// Parse the calendar part of a date or ISO-8601 timestamp.
///
/// Accepts `2024-05-01` as well as `2024-05-01T00:00:00.000Z`.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    let head = raw.trim().get(..10)?;
    Date::parse(head, &format).ok()
}

// =============================================================================
// WORDS
// =============================================================================

/// A `{word, meaning}` pair used for both synonyms and antonyms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedWord {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub meaning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDetails {
    #[serde(default)]
    pub actual_meaning: String,
    #[serde(default)]
    pub sentences: Vec<String>,
    #[serde(default)]
    pub one_word_substitutes: Vec<String>,
}

/// Server-generated enrichment attached by `POST /api/words/:id/gemini`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    #[serde(default, rename = "hindiMeaning")]
    pub translated_meaning: Option<String>,
    #[serde(default)]
    pub learning_tips: Option<String>,
    #[serde(default)]
    pub fetched_at: Option<String>,
}

/// A vocabulary record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(rename = "_id")]
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub user_meaning: String,
    #[serde(default)]
    pub synonyms: Vec<RelatedWord>,
    #[serde(default)]
    pub antonyms: Vec<RelatedWord>,
    #[serde(default)]
    pub details: WordDetails,
    #[serde(default, rename = "geminiData", skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<Enrichment>,
}

impl Word {
    /// Whether the server has already enriched this record.
    #[must_use]
    pub fn is_enriched(&self) -> bool {
        self.enrichment
            .as_ref()
            .is_some_and(|e| e.fetched_at.is_some())
    }
}

/// Writable word shape: the body of a full create (`POST`) or full
/// replace (`PATCH`). Drafts and committed records share this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WordInput {
    pub word: String,
    pub user_meaning: String,
    pub synonyms: Vec<RelatedWord>,
    pub antonyms: Vec<RelatedWord>,
    pub details: WordDetails,
}

/// Body of a quick-add: headword only, the server fills in the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAdd<'a> {
    pub word: &'a str,
}

/// Server-authoritative pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: u32,
    pub pages: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { current: 1, pages: 1, total: 0 }
    }
}

/// One page of words plus its pagination block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPage {
    pub words: Vec<Word>,
    pub pagination: Pagination,
}

/// Parameters for `GET /api/words`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub date: Option<Date>,
}

impl WordQuery {
    /// Query-string pairs. `search` and `date` are omitted when unset.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_owned()));
        }
        if let Some(date) = self.date {
            pairs.push(("date", format_date(date)));
        }
        pairs
    }
}

/// Body for the word/flashcard association calls. An empty body means
/// "today" on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl DateBody {
    #[must_use]
    pub fn new(date: Option<Date>) -> Self {
        Self { date: date.map(format_date) }
    }
}

// =============================================================================
// FLASHCARDS
// =============================================================================

/// A flashcard's word reference: populated record or bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WordRef {
    Populated(Box<Word>),
    Id(String),
}

impl WordRef {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Populated(word) => &word.id,
            Self::Id(id) => id,
        }
    }

    #[must_use]
    pub fn word(&self) -> Option<&Word> {
        match self {
            Self::Populated(word) => Some(word),
            Self::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardEntry {
    pub word: WordRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
}

/// A dated collection of word references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub words: Vec<FlashcardEntry>,
    #[serde(default)]
    pub completed: bool,
}

impl Flashcard {
    /// Calendar date of this flashcard, if the server's value parses.
    #[must_use]
    pub fn calendar_date(&self) -> Option<Date> {
        parse_calendar_date(&self.date)
    }

    /// Title for list display: explicit title, else the date.
    #[must_use]
    pub fn label(&self) -> String {
        match self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(title) => title.to_owned(),
            None => self
                .calendar_date()
                .map_or_else(|| self.date.clone(), format_date),
        }
    }
}

/// Body of `POST /api/flashcards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFlashcard {
    pub date: String,
    pub title: String,
}

impl NewFlashcard {
    #[must_use]
    pub fn new(date: Date, title: Option<&str>) -> Self {
        Self { date: format_date(date), title: title.unwrap_or_default().trim().to_owned() }
    }
}

// =============================================================================
// ENVELOPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WordsData {
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TodayData {
    #[serde(default)]
    pub flashcard: Option<Flashcard>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlashcardsData {
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

/// Any response that may carry a human-readable `message`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// EMAIL
// =============================================================================

/// A file attached to an email job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    #[must_use]
    pub fn pdf(file_name: &str, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.to_owned(), mime: "application/pdf".to_owned(), bytes }
    }
}

/// One bulk-send request. Lives only for the duration of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJob {
    pub recipients: Vec<String>,
    pub subject: String,
    pub message: String,
    pub sender: String,
    pub attachment: Option<Attachment>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
