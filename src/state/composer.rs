//! Bulk-email composer form state.
//!
//! The sender address is a two-step field: typing edits `sender_input`,
//! and only [`ComposerState::confirm_sender`] makes it the job's sender.
//! A submit without a confirmed sender raises the border cue, which stays
//! on until the field is edited again.

use crate::net::types::{ApiError, Attachment, EmailJob};

pub const SENDER_REQUIRED: &str = "First set your email";
pub const FIELDS_REQUIRED: &str = "Please fill out all required fields.";
pub const SEND_SUCCEEDED: &str = "Emails sent successfully!";
pub const SEND_FAILED: &str = "Failed to send emails. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("First set your email")]
    SenderRequired,
    #[error("Please fill out all required fields.")]
    MissingFields,
    #[error("a send is already in progress")]
    InFlight,
}

/// Split a comma-separated recipient string into trimmed addresses.
/// Empty entries are dropped.
#[must_use]
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct ComposerState {
    pub sender_input: String,
    sender: Option<String>,
    sender_flagged: bool,
    pub recipients: String,
    pub subject: String,
    pub message: String,
    pub attachment: Option<Attachment>,
    status: Option<String>,
    in_flight: bool,
}

impl ComposerState {
    /// Edit the sender field. Clears the border cue.
    pub fn edit_sender(&mut self, text: impl Into<String>) {
        self.sender_flagged = false;
        self.sender_input = text.into();
    }

    /// Confirm the typed sender address.
    pub fn confirm_sender(&mut self) {
        self.sender_flagged = false;
        let trimmed = self.sender_input.trim();
        self.sender = if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) };
    }

    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Whether the sender field shows the error border.
    #[must_use]
    pub fn sender_flagged(&self) -> bool {
        self.sender_flagged
    }

    /// Inline sender error, shown only while the border cue is on.
    #[must_use]
    pub fn sender_error(&self) -> Option<&'static str> {
        self.sender_flagged.then_some(SENDER_REQUIRED)
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The line to show after a submit: the sender error while the cue is
    /// on, otherwise the status.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.sender_error().or_else(|| self.status())
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// The submit control exists only while no send is outstanding.
    #[must_use]
    pub fn submit_visible(&self) -> bool {
        !self.in_flight
    }

    /// Validate the form and, if valid, mark a send as in flight and
    /// return the job to transmit.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; no job is produced and no network
    /// call should be made.
    pub fn begin_submit(&mut self) -> Result<EmailJob, ComposeError> {
        if self.in_flight {
            return Err(ComposeError::InFlight);
        }
        let Some(sender) = self.sender.clone() else {
            self.sender_flagged = true;
            return Err(ComposeError::SenderRequired);
        };

        let recipients = parse_recipients(&self.recipients);
        if recipients.is_empty() || self.subject.is_empty() || self.message.is_empty() {
            self.status = Some(FIELDS_REQUIRED.to_owned());
            return Err(ComposeError::MissingFields);
        }

        self.in_flight = true;
        Ok(EmailJob {
            recipients,
            subject: self.subject.clone(),
            message: self.message.clone(),
            sender,
            attachment: self.attachment.clone(),
        })
    }

    /// Record the outcome of the send started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, outcome: &Result<Option<String>, ApiError>) {
        self.in_flight = false;
        self.status = Some(match outcome {
            Ok(message) => message
                .clone()
                .unwrap_or_else(|| SEND_SUCCEEDED.to_owned()),
            Err(_) => SEND_FAILED.to_owned(),
        });
    }
}

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;
