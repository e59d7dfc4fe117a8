pub mod credentials;

pub use credentials::{describe_deposit_point, mask_secret};
