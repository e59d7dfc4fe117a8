//! Error handling for deposit dispatch
//!
//! The taxonomy follows the blast radius of each failure: a packaging error
//! aborts the whole dispatch run, a deposit error is isolated to a single
//! deposit point, and a notification error is best-effort and only logged.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while assembling the deposit package.
///
/// A packaging failure means there is nothing to deposit: the coordinator
/// records a single synthetic failure and attempts zero deposit points.
#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("submission {submission_id} is missing content file {path}")]
    MissingFile { submission_id: i64, path: PathBuf },

    #[error("submission {submission_id} has no content files to deposit")]
    NoFiles { submission_id: i64 },

    #[error("failed to prepare package directory {path}")]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write deposit metadata for submission {submission_id}")]
    Metadata {
        submission_id: i64,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to assemble deposit archive")]
    Archive {
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to bundle {path} into the deposit archive")]
    Bundle {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PackagingError {
    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "MISSING_FILE",
            Self::NoFiles { .. } => "NO_FILES",
            Self::WorkingDirectory { .. } => "WORKING_DIRECTORY",
            Self::Metadata { .. } => "METADATA",
            Self::Archive { .. } => "ARCHIVE",
            Self::Bundle { .. } => "BUNDLE",
        }
    }
}

/// Per-point errors raised by the SWORD protocol exchange.
///
/// These never abort sibling deposit points; the coordinator converts each
/// one into a failed [`DepositOutcome`](crate::orchestration::DepositOutcome).
#[derive(Error, Debug)]
pub enum DepositError {
    #[error("[{deposit_point}] authentication failed (HTTP {status})")]
    AuthenticationFailed { deposit_point: String, status: u16 },

    #[error("[{deposit_point}] deposit request timed out")]
    Timeout { deposit_point: String },

    #[error("[{deposit_point}] network error: {message}")]
    Network {
        deposit_point: String,
        message: String,
    },

    #[error("[{deposit_point}] deposit rejected (HTTP {status}): {message}")]
    Rejected {
        deposit_point: String,
        status: u16,
        message: String,
    },

    #[error("[{deposit_point}] package archive could not be read: {message}")]
    UnreadablePackage {
        deposit_point: String,
        message: String,
    },
}

impl DepositError {
    /// Get the deposit point name associated with this error
    pub fn deposit_point(&self) -> &str {
        match self {
            Self::AuthenticationFailed { deposit_point, .. }
            | Self::Timeout { deposit_point }
            | Self::Network { deposit_point, .. }
            | Self::Rejected { deposit_point, .. }
            | Self::UnreadablePackage { deposit_point, .. } => deposit_point,
        }
    }

    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "AUTHENTICATION_FAILED",
            Self::Timeout { .. } => "TIMEOUT",
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Rejected { .. } => "DEPOSIT_REJECTED",
            Self::UnreadablePackage { .. } => "UNREADABLE_PACKAGE",
        }
    }
}

/// Best-effort errors from the notification path.
///
/// Never escalated: the coordinator logs the failure and still returns its
/// dispatch report.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send deposit notification to {recipient}: {message}")]
    Send { recipient: String, message: String },
}

/// Errors raised while loading deposit configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("environment variable {name} referenced in configuration is not set")]
    MissingEnvVar { name: String },
}
