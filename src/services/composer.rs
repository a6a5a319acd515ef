//! Bulk-email composer flow.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::ActionError;
use crate::net::api::MailTransport;
use crate::state::composer::ComposerState;

pub struct Composer<M: MailTransport> {
    mailer: Arc<M>,
    state: Arc<Mutex<ComposerState>>,
}

impl<M: MailTransport> Clone for Composer<M> {
    fn clone(&self) -> Self {
        Self { mailer: Arc::clone(&self.mailer), state: Arc::clone(&self.state) }
    }
}

impl<M: MailTransport> Composer<M> {
    #[must_use]
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer, state: Arc::new(Mutex::new(ComposerState::default())) }
    }

    /// Lock the form for reading or editing fields.
    pub async fn state(&self) -> MutexGuard<'_, ComposerState> {
        self.state.lock().await
    }

    /// Validate and send the form. At most one send is outstanding.
    ///
    /// Returns the status line shown after the send: the server's message,
    /// or a fixed success text.
    ///
    /// # Errors
    ///
    /// Returns `Compose` when validation fails (nothing is sent), otherwise
    /// the transport failure.
    pub async fn submit(&self) -> Result<String, ActionError> {
        let job = self.state.lock().await.begin_submit()?;
        tracing::info!(recipients = job.recipients.len(), sender = %job.sender, "sending emails");

        let outcome = self.mailer.send(&job).await;

        let mut state = self.state.lock().await;
        state.finish_submit(&outcome);
        match outcome {
            Ok(_) => Ok(state.status().unwrap_or_default().to_owned()),
            Err(error) => {
                tracing::error!(%error, "error sending emails");
                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;
