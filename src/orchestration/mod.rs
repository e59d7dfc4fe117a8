//! Orchestration layer for deposit dispatch
//!
//! Coordinates one dispatch run per publish event across all configured
//! deposit points and produces the aggregated delivery report.

pub mod dispatch;

pub use dispatch::{DepositOutcome, DispatchCoordinator, DispatchReport, STATUS_SUCCEEDED};
