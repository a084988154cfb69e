//! Request and outcome envelope types.
//!
//! Every externally-facing operation in the retrieval core returns one of
//! the outcome envelopes defined here. Exactly one of `data`/`error` is
//! populated, matching `status`; failures surface only as a `report`
//! string plus a separate diagnostic `error` string.

use crate::filter::Constraint;
use crate::normalize::NormalizedRecord;
use serde::{Deserialize, Serialize};
use shopwise_core::AppError;

/// Default page size for search calls.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Report string for a successful search.
pub const SEARCH_SUCCESS_REPORT: &str = "Search completed successfully.";

/// Report string for any contained search failure.
pub const SEARCH_ERROR_REPORT: &str =
    "An unexpected error occurred while answering the question.";

/// The two retrieval targets, each with its own datastore and constraint
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendId {
    Item,
    Review,
}

/// One search request against a single backend.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text query; must be non-empty after trimming
    pub query: String,

    /// Structured constraints, compiled in declaration order
    pub constraints: Vec<Constraint>,

    /// Page size for the backend call
    pub max_results: u32,

    /// Which datastore to search
    pub backend: BackendId,
}

impl SearchRequest {
    /// Create a request with no constraints and the default page size.
    pub fn new(query: impl Into<String>, backend: BackendId) -> Self {
        Self {
            query: query.into(),
            constraints: Vec::new(),
            max_results: DEFAULT_MAX_RESULTS,
            backend,
        }
    }

    /// Attach structured constraints.
    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Override the page size.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Payload of a successful retrieval.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalData {
    /// Which source produced the records (datastore id for search calls,
    /// collaborator name for routed strategies)
    pub source: String,

    /// Normalized result records, in backend order
    pub records: Vec<NormalizedRecord>,
}

/// Uniform success/error envelope for retrieval operations.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalOutcome {
    pub status: Status,

    /// Human-readable status message
    pub report: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RetrievalData>,

    /// Raw diagnostic message, present only on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RetrievalOutcome {
    /// Successful retrieval with normalized records.
    pub fn success(source: impl Into<String>, records: Vec<NormalizedRecord>) -> Self {
        Self {
            status: Status::Success,
            report: SEARCH_SUCCESS_REPORT.to_string(),
            data: Some(RetrievalData {
                source: source.into(),
                records,
            }),
            error: None,
        }
    }

    /// Contained failure; the caller sees a report plus the diagnostic
    /// message, never the error itself.
    pub fn failure(err: AppError) -> Self {
        Self {
            status: Status::Error,
            report: SEARCH_ERROR_REPORT.to_string(),
            data: None,
            error: Some(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Summary of a list of reviews. Built fresh per call, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Generated summary text
    pub summary: String,

    /// Number of reviews considered
    pub review_count: usize,
}

/// Uniform success/error envelope for summarization.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutcome {
    pub status: Status,

    /// Human-readable status message
    pub report: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ReviewSummary>,

    /// Raw diagnostic message, present only on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryOutcome {
    pub fn success(report: impl Into<String>, summary: ReviewSummary) -> Self {
        Self {
            status: Status::Success,
            report: report.into(),
            data: Some(summary),
            error: None,
        }
    }

    pub fn failure(report: impl Into<String>, err: AppError) -> Self {
        Self {
            status: Status::Error,
            report: report.into(),
            data: None,
            error: Some(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let request = SearchRequest::new("running shoes", BackendId::Item);
        assert_eq!(request.max_results, DEFAULT_MAX_RESULTS);
        assert!(request.constraints.is_empty());
    }

    #[test]
    fn test_success_outcome_shape() {
        let outcome = RetrievalOutcome::success("item-datastore", Vec::new());
        assert!(outcome.is_success());
        assert_eq!(outcome.report, SEARCH_SUCCESS_REPORT);
        assert!(outcome.data.is_some());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_failure_outcome_shape() {
        let outcome =
            RetrievalOutcome::failure(AppError::Backend("connection refused".to_string()));
        assert!(!outcome.is_success());
        assert_eq!(outcome.report, SEARCH_ERROR_REPORT);
        assert!(outcome.data.is_none());
        assert!(outcome.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_outcome_serialization_omits_empty_fields() {
        let outcome = RetrievalOutcome::success("ds", Vec::new());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("error").is_none());

        let failed = RetrievalOutcome::failure(AppError::Other("boom".to_string()));
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("data").is_none());
    }
}
