//! Multipart client for the bulk-email endpoint.
//!
//! `POST {mailer_url}/send-emails` with fields `emailList`, `subject`,
//! `message`, `yourEmail` and an optional `pdfFile` part. `emailList` is
//! a single text field holding the trimmed addresses joined by commas.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::api::MailTransport;
use super::client::{build_http, decode, execute};
use super::types::{ApiError, EmailJob, MessageBody};
use crate::config::ClientConfig;

pub const SEND_EMAILS_PATH: &str = "/send-emails";

pub struct MailClient {
    http: reqwest::Client,
    endpoint: String,
}

impl MailClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = build_http(config.timeouts)?;
        Ok(Self { http, endpoint: format!("{}{SEND_EMAILS_PATH}", config.mailer_url) })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Build the multipart body for one job.
///
/// # Errors
///
/// Returns an error if the attachment's mime type is rejected.
pub fn build_form(job: &EmailJob) -> Result<Form, ApiError> {
    let form = Form::new()
        .text("emailList", job.recipients.join(","))
        .text("subject", job.subject.clone())
        .text("message", job.message.clone())
        .text("yourEmail", job.sender.clone());

    let Some(attachment) = &job.attachment else {
        return Ok(form);
    };
    let part = Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(&attachment.mime)
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok(form.part("pdfFile", part))
}

#[async_trait]
impl MailTransport for MailClient {
    async fn send(&self, job: &EmailJob) -> Result<Option<String>, ApiError> {
        let form = build_form(job)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            recipients = job.recipients.len(),
            attachment = job.attachment.is_some(),
            "sending email job"
        );
        let text = execute(self.http.post(&self.endpoint).multipart(form)).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        let body: MessageBody = decode(&text)?;
        Ok(body.message.filter(|m| !m.trim().is_empty()))
    }
}
