pub mod config;
pub mod error;
pub mod submission;
pub mod traits;

pub use config::*;
pub use error::*;
pub use submission::*;
pub use traits::*;
