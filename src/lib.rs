pub mod client;
pub mod core;
pub mod notification;
pub mod orchestration;
pub mod packaging;
pub mod security;

pub use self::core::*;
pub use client::SwordClient;
pub use notification::{LogMailer, NotificationComposer, NotificationMessage};
pub use orchestration::{DepositOutcome, DispatchCoordinator, DispatchReport};
pub use packaging::{DepositPackage, PackageBuilder};
pub use security::{describe_deposit_point, mask_secret};
