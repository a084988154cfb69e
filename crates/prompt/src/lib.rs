//! Prompt templates for the Shopwise retrieval core.
//!
//! This crate holds the fixed Handlebars templates sent to the generation
//! capability and the builders that render them with request data.

pub mod builder;
pub mod templates;

pub use builder::build_review_summary_prompt;
