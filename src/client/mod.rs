pub mod sword_client;

pub use sword_client::{API_KEY_HEADER, METS_PACKAGING, SwordClient};
