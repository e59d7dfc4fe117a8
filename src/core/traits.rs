//! Collaborator seams for the dispatch core
//!
//! The coordinator receives all of its collaborators through these traits so
//! the host can supply real implementations while tests supply stubs. No
//! service locator or global registry is involved.

use crate::core::config::DepositPoint;
use crate::core::error::{DepositError, NotificationError};
use crate::notification::NotificationMessage;
use crate::packaging::DepositPackage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Performs the SWORD protocol exchange against one deposit point
///
/// Implementations make exactly one attempt per call; retry policy belongs
/// to the caller (the coordinator currently retries nothing).
#[async_trait]
pub trait Depositor: Send + Sync {
    async fn deposit(
        &self,
        package: &DepositPackage,
        point: &DepositPoint,
    ) -> Result<(), DepositError>;
}

/// External mail-delivery collaborator
///
/// The dispatch core only composes messages; delivery is the host's concern.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError>;
}

/// Time source for the notification date field
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
