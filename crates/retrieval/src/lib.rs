//! Shopwise retrieval core.
//!
//! This crate routes shopping requests to retrieval backends and packages
//! every result in a uniform outcome envelope:
//! - **Filter compiler**: typed constraints to backend-native filter strings
//! - **Result normalizer**: heterogeneous payloads to one record shape
//! - **Retrieval gateway**: one backend behind an async search contract,
//!   the single error-containment point
//! - **Query router**: strategy selection and concurrent fan-out
//! - **Summarization adapter**: bounded review lists to the generation
//!   capability

pub mod filter;
pub mod gateway;
pub mod normalize;
pub mod router;
pub mod summarize;
pub mod types;

// Re-export commonly used types
pub use filter::{compile, Comparison, Constraint, FilterValue, ItemFilterParams, ReviewFilterParams};
pub use gateway::{DiscoveryBackend, RetrievalGateway, SearchBackend};
pub use normalize::{normalize, NormalizedRecord, NormalizedValue};
pub use router::{QueryRouter, ResearchEngine, RoutedQuery, StructuredQueryEngine};
pub use summarize::SummarizeAdapter;
pub use types::{BackendId, RetrievalData, RetrievalOutcome, ReviewSummary, SearchRequest, Status, SummaryOutcome};
