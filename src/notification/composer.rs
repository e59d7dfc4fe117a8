//! Delivery-report notification
//!
//! Formats one administrative email per dispatch run summarizing the
//! per-point outcomes. Composition is pure: the date comes in as a
//! parameter and identical inputs produce byte-identical messages.
//! Delivery goes through the external [`MailSender`] collaborator; authors
//! are deliberately not notified.

use crate::core::config::NotificationConfig;
use crate::core::error::NotificationError;
use crate::core::submission::Submission;
use crate::core::traits::MailSender;
use crate::orchestration::DispatchReport;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A composed notification, ready for an external mailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub from_name: String,
    pub from_email: String,
    pub to_name: String,
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Formats dispatch reports into administrator notifications
pub struct NotificationComposer {
    context_name: String,
    notification: NotificationConfig,
}

impl NotificationComposer {
    pub fn new(context_name: &str, notification: NotificationConfig) -> Self {
        Self {
            context_name: context_name.to_string(),
            notification,
        }
    }

    /// Compose the delivery report for one dispatch run
    ///
    /// Template fields: identifier ("context - submission id"), package
    /// directory name, title, author string, date (m.d.y), and a status
    /// line that is exactly "Deposit Succeeded" when every outcome
    /// succeeded, otherwise the last captured failure message.
    pub fn compose(
        &self,
        submission: &Submission,
        report: &DispatchReport,
        date: DateTime<Utc>,
    ) -> NotificationMessage {
        let identifier = format!("{} - {}", self.context_name, submission.id);

        let mut body = String::new();
        body.push_str(&format!("SWORD deposit report for {}\n\n", identifier));
        body.push_str(&format!("Submission: {}\n", submission.title));
        body.push_str(&format!("Authors: {}\n", submission.author_string()));
        body.push_str(&format!("Deposit directory: {}\n", report.directory_name));
        body.push_str(&format!("Date: {}\n\n", date.format("%m.%d.%y")));

        if report.outcomes.is_empty() {
            body.push_str("No deposit points are configured for this context.\n");
        } else {
            body.push_str("Deposit points:\n");
            for outcome in &report.outcomes {
                if outcome.success {
                    body.push_str(&format!("  [OK] {}\n", outcome.deposit_point_name));
                } else {
                    body.push_str(&format!(
                        "  [FAILED] {}: {}\n",
                        outcome.deposit_point_name,
                        outcome.message.as_deref().unwrap_or("unknown error"),
                    ));
                }
            }
        }
        body.push_str(&format!("\nStatus: {}\n", report.status_line()));

        NotificationMessage {
            from_name: self.notification.sender_name.clone(),
            from_email: self.notification.sender_email.clone(),
            to_name: self.notification.recipient_name.clone(),
            to_email: self.notification.recipient_email.clone(),
            subject: format!("SWORD Deposit Notification: {}", identifier),
            body,
        }
    }
}

/// Mailer that writes messages to the operational log
///
/// Stands in for a real delivery backend in the operator binary and in
/// environments without an outbound mail relay.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl MailSender for LogMailer {
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        tracing::info!(
            to = %message.to_email,
            subject = %message.subject,
            body = %message.body,
            "deposit notification"
        );
        Ok(())
    }
}
