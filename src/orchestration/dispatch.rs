//! Dispatch coordination for automatic deposits
//!
//! One dispatch run per publish event: build the package once, attempt every
//! configured deposit point with per-point isolation, clean the package up
//! exactly once, then mail the administrator a single aggregated report.
//! The coordinator always completes and returns its report; nothing escapes
//! to the triggering event handler as an unhandled fault.

use crate::core::config::{DepositPoint, SwordConfig};
use crate::core::submission::{PublishEvent, Submission};
use crate::core::traits::{Clock, Depositor, MailSender};
use crate::notification::NotificationComposer;
use crate::packaging::PackageBuilder;
use std::sync::Arc;
use uuid::Uuid;

/// Literal status line for a fully successful run
pub const STATUS_SUCCEEDED: &str = "Deposit Succeeded";

/// Name recorded on the synthetic outcome of a packaging failure
const PACKAGING_OUTCOME_NAME: &str = "packaging";

/// Result of one deposit attempt against one deposit point
///
/// `deposit_point_id` is `None` only for the synthetic outcome recorded when
/// packaging fails before any point is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositOutcome {
    pub deposit_point_id: Option<i64>,
    pub deposit_point_name: String,
    pub success: bool,
    pub message: Option<String>,
}

impl DepositOutcome {
    fn succeeded(point: &DepositPoint) -> Self {
        Self {
            deposit_point_id: Some(point.id),
            deposit_point_name: point.name.clone(),
            success: true,
            message: None,
        }
    }

    fn failed(point: &DepositPoint, message: String) -> Self {
        Self {
            deposit_point_id: Some(point.id),
            deposit_point_name: point.name.clone(),
            success: false,
            message: Some(message),
        }
    }
}

/// Aggregated result of one dispatch run
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub run_id: Uuid,
    /// Package directory name; empty when packaging failed
    pub directory_name: String,
    pub outcomes: Vec<DepositOutcome>,
    /// True iff every outcome succeeded; vacuously true for zero points
    pub success: bool,
    /// Last captured failure message, if any outcome failed
    pub failure_message: Option<String>,
}

impl DispatchReport {
    /// Status line for the administrator notification
    pub fn status_line(&self) -> String {
        if self.success {
            STATUS_SUCCEEDED.to_string()
        } else {
            self.failure_message
                .clone()
                .unwrap_or_else(|| "Deposit failed".to_string())
        }
    }
}

/// Coordinates deposit dispatch for publish events
///
/// All collaborators are injected: the protocol client, the mail sender,
/// and the time source. The coordinator itself holds no mutable state and
/// is invoked at most once per publish event by the host.
pub struct DispatchCoordinator {
    config: SwordConfig,
    builder: PackageBuilder,
    composer: NotificationComposer,
    depositor: Arc<dyn Depositor>,
    mailer: Arc<dyn MailSender>,
    clock: Arc<dyn Clock>,
}

impl DispatchCoordinator {
    pub fn new(
        config: SwordConfig,
        depositor: Arc<dyn Depositor>,
        mailer: Arc<dyn MailSender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let builder = PackageBuilder::new(&config.working_directory, &config.context_name);
        let composer =
            NotificationComposer::new(&config.context_name, config.notification.clone());
        Self {
            config,
            builder,
            composer,
            depositor,
            mailer,
            clock,
        }
    }

    /// Entry point for the host's publish event
    ///
    /// Dispatches to every deposit point configured for this context.
    pub async fn handle_publish(&self, event: &PublishEvent) -> Option<DispatchReport> {
        self.perform_automatic_deposits(&event.submission, &self.config.deposit_points)
            .await
    }

    /// Run one dispatch for a submission against the given deposit points
    ///
    /// Returns `None` without any side effect when the submission is not
    /// published. Otherwise builds the package once, attempts every point in
    /// the supplied order, cleans up, notifies, and returns the report.
    pub async fn perform_automatic_deposits(
        &self,
        submission: &Submission,
        deposit_points: &[DepositPoint],
    ) -> Option<DispatchReport> {
        if !submission.is_published() {
            tracing::debug!(
                submission_id = submission.id,
                "skipping dispatch for unpublished submission"
            );
            return None;
        }

        let run_id = Uuid::new_v4();
        let mut outcomes = Vec::new();
        let mut directory_name = String::new();

        match self.builder.build(submission).await {
            Ok(package) => {
                directory_name = package.directory_name.clone();

                for point in deposit_points {
                    match self.depositor.deposit(&package, point).await {
                        Ok(()) => outcomes.push(DepositOutcome::succeeded(point)),
                        Err(error) => {
                            // Isolated: one unreachable repository must not
                            // block delivery to the others.
                            tracing::error!(
                                run_id = %run_id,
                                deposit_point = %point.name,
                                code = error.code(),
                                "deposit failed: {error}"
                            );
                            outcomes.push(DepositOutcome::failed(point, error.to_string()));
                        }
                    }
                }

                if let Err(error) = package.cleanup().await {
                    tracing::warn!(
                        run_id = %run_id,
                        dir = %package.dir.display(),
                        "package cleanup failed: {error}"
                    );
                }
            }
            Err(error) => {
                tracing::error!(
                    run_id = %run_id,
                    submission_id = submission.id,
                    code = error.code(),
                    "packaging failed, no deposits attempted: {error}"
                );
                outcomes.push(DepositOutcome {
                    deposit_point_id: None,
                    deposit_point_name: PACKAGING_OUTCOME_NAME.to_string(),
                    success: false,
                    message: Some(error.to_string()),
                });
            }
        }

        let success = outcomes.iter().all(|outcome| outcome.success);
        let failure_message = outcomes
            .iter()
            .filter(|outcome| !outcome.success)
            .next_back()
            .and_then(|outcome| outcome.message.clone());

        let report = DispatchReport {
            run_id,
            directory_name,
            outcomes,
            success,
            failure_message,
        };

        let message = self
            .composer
            .compose(submission, &report, self.clock.now());
        if let Err(error) = self.mailer.send(&message).await {
            // Best-effort: the report still stands.
            tracing::warn!(run_id = %run_id, "notification failed: {error}");
        }

        Some(report)
    }
}
