//! Notification Dispatcher — the delivery seam for job-match notifications.
//!
//! The fan-out only depends on `Notifier`; transports (log, SMS, email) are swapped at
//! startup. `AppState` never sees the notifier directly, it is owned by the queue.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("delivery to {contact} failed: {reason}")]
    Delivery { contact: String, reason: String },

    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one "new job matching your skills" message.
    async fn notify(
        &self,
        seeker_name: &str,
        seeker_contact: &str,
        job_title: &str,
    ) -> Result<(), NotificationError>;
}

/// Default transport: writes the notification to the structured log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        seeker_name: &str,
        seeker_contact: &str,
        job_title: &str,
    ) -> Result<(), NotificationError> {
        info!(
            contact = %seeker_contact,
            "{}",
            render_message(seeker_name, job_title)
        );
        Ok(())
    }
}

/// Builds the message body a real transport would send.
pub fn render_message(seeker_name: &str, job_title: &str) -> String {
    format!("Hi {seeker_name}, a new job matching your skills has been posted: '{job_title}'")
}
