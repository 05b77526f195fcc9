//! launchdash-common — Shared error type and configuration used across all launchdash crates.

pub mod error;
pub mod config;

pub use config::{DashConfig, DashboardConfig, ScatterColor};
pub use error::{DashError, Result};
