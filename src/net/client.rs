//! reqwest-backed implementation of [`VocabApi`].

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::Date;

use super::api::VocabApi;
use super::types::{
    ApiError, DateBody, Envelope, Flashcard, FlashcardsData, MessageBody, NewFlashcard, QuickAdd, TodayData,
    WordInput, WordPage, WordQuery, WordsData,
};
use crate::config::{ClientConfig, Timeouts};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = build_http(config.timeouts)?;
        Ok(Self { http, base_url: config.api_base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, %path, "api request");
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    async fn send_json(&self, method: Method, path: &str, body: &impl Serialize) -> Result<String, ApiError> {
        execute(self.request(method, path).json(body)).await
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<String, ApiError> {
        execute(self.request(method, path)).await
    }
}

#[async_trait]
impl VocabApi for ApiClient {
    async fn list_words(&self, query: &WordQuery) -> Result<WordPage, ApiError> {
        let text = execute(self.request(Method::GET, "/api/words").query(&query.pairs())).await?;
        let envelope: Envelope<WordsData> = decode(&text)?;
        Ok(WordPage { words: envelope.data.words, pagination: envelope.pagination.unwrap_or_default() })
    }

    async fn create_word(&self, input: &WordInput) -> Result<(), ApiError> {
        self.send_json(Method::POST, "/api/words", input).await?;
        Ok(())
    }

    async fn quick_add_word(&self, word: &str) -> Result<(), ApiError> {
        self.send_json(Method::POST, "/api/words", &QuickAdd { word }).await?;
        Ok(())
    }

    async fn update_word(&self, id: &str, input: &WordInput) -> Result<(), ApiError> {
        self.send_json(Method::PATCH, &format!("/api/words/{id}"), input)
            .await?;
        Ok(())
    }

    async fn delete_word(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/api/words/{id}"))
            .await?;
        Ok(())
    }

    async fn enrich_word(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::POST, &format!("/api/words/{id}/gemini"))
            .await?;
        Ok(())
    }

    async fn add_word_to_flashcard(&self, id: &str, date: Option<Date>) -> Result<(), ApiError> {
        let path = format!("/api/words/{id}/flashcards");
        self.send_json(Method::POST, &path, &DateBody::new(date))
            .await?;
        Ok(())
    }

    async fn remove_word_from_flashcard(&self, id: &str, date: Option<Date>) -> Result<(), ApiError> {
        let path = format!("/api/words/{id}/flashcards");
        self.send_json(Method::DELETE, &path, &DateBody::new(date))
            .await?;
        Ok(())
    }

    async fn today_flashcard(&self) -> Result<Option<Flashcard>, ApiError> {
        let text = self
            .send_empty(Method::GET, "/api/flashcards/today")
            .await?;
        let envelope: Envelope<TodayData> = decode(&text)?;
        Ok(envelope.data.flashcard)
    }

    async fn list_flashcards(&self, date: Option<Date>) -> Result<Vec<Flashcard>, ApiError> {
        let params: Vec<(&str, String)> = DateBody::new(date)
            .date
            .map(|d| ("date", d))
            .into_iter()
            .collect();
        let text = execute(self.request(Method::GET, "/api/flashcards").query(&params)).await?;
        let envelope: Envelope<FlashcardsData> = decode(&text)?;
        Ok(envelope.data.flashcards)
    }

    async fn create_flashcard(&self, body: &NewFlashcard) -> Result<(), ApiError> {
        self.send_json(Method::POST, "/api/flashcards", body).await?;
        Ok(())
    }

    async fn complete_flashcard(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::PATCH, &format!("/api/flashcards/{id}/complete"))
            .await?;
        Ok(())
    }

    async fn delete_flashcard(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/api/flashcards/{id}"))
            .await?;
        Ok(())
    }
}

// =============================================================================
// SHARED HTTP HELPERS
// =============================================================================

pub(crate) fn build_http(timeouts: Timeouts) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(request) = timeouts.request {
        builder = builder.timeout(request);
    }
    if let Some(connect) = timeouts.connect {
        builder = builder.connect_timeout(connect);
    }
    builder
        .build()
        .map_err(|e| ApiError::Transport(e.to_string()))
}

/// Send a request and return the body text of a 2xx response.
pub(crate) async fn execute(request: RequestBuilder) -> Result<String, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(server_error(status, &text));
    }
    Ok(text)
}

pub(crate) fn server_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());
    ApiError::Server { status, message }
}

pub(crate) fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
