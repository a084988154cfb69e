//! Shopwise Core Library
//!
//! This crate provides the foundational utilities for the Shopwise retrieval
//! core:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management and the settings cache

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, Location, SettingsCache};
pub use error::{AppError, AppResult};
