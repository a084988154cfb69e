//! Command handlers for the Shopwise CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod items;
pub mod reviews;
pub mod summarize;

// Re-export command types for convenience
pub use items::ItemsCommand;
pub use reviews::ReviewsCommand;
pub use summarize::SummarizeCommand;
