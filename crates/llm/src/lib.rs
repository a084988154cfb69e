//! Generation capability for the Shopwise retrieval core.
//!
//! This crate provides a provider-agnostic abstraction for the external
//! text-generation capability. Providers are reached through a unified
//! trait-based interface.
//!
//! # Providers
//! - **Gemini**: Generative Language API (default)
//! - **Ollama**: Local LLM runtime
//!
//! # Example
//! ```no_run
//! use shopwise_llm::{GenerationClient, GenerationRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = GenerationRequest::new("Hello, world!", "llama3.2");
//! let response = client.generate(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{GenerationClient, GenerationRequest, GenerationResponse, GenerationUsage};
pub use factory::create_client;
pub use providers::{GeminiClient, OllamaClient};
