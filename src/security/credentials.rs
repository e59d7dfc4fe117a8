//! Credential masking for display and diagnostics
//!
//! Deposit-point passwords and API keys are held as [`secrecy::SecretString`]
//! so they never land in logs or debug output by accident. Anything that
//! deliberately displays a credential goes through the masking helpers here.

use crate::core::config::{DepositPoint, PASSWORD_SLUG};
use secrecy::ExposeSecret;

/// Masks a secret for safe display
///
/// Shows only the first 3 and last 3 characters for identification purposes.
/// Secrets shorter than 10 characters are fully masked with the password slug.
///
/// # Examples
///
/// ```
/// use sword_depositor::security::mask_secret;
///
/// assert_eq!(mask_secret("abcdef123456"), "abc...456");
/// assert_eq!(mask_secret("short"), "******");
/// ```
pub fn mask_secret(secret: &str) -> String {
    // Indexing by char, not byte: multibyte secrets must not panic.
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 10 {
        return PASSWORD_SLUG.to_string();
    }
    let prefix: String = chars[..3].iter().collect();
    let suffix: String = chars[chars.len() - 3..].iter().collect();
    format!("{prefix}...{suffix}")
}

/// One-line description of a deposit point with masked credentials
pub fn describe_deposit_point(point: &DepositPoint) -> String {
    let api_key = match &point.api_key {
        Some(key) => mask_secret(key.expose_secret()),
        None => "none".to_string(),
    };
    format!(
        "{} [{}] {} (user: {}, password: {}, api key: {})",
        point.name,
        point.point_type.as_str(),
        point.sword_url,
        point.username,
        mask_secret(point.password.expose_secret()),
        api_key,
    )
}
