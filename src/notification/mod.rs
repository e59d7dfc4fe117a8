pub mod composer;

pub use composer::{LogMailer, NotificationComposer, NotificationMessage};
