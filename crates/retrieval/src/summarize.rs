//! Summarization adapter.
//!
//! Feeds a bounded list of review texts to the generation capability and
//! packages the result with a count. Like the gateway, the adapter's
//! signature is infallible; every generation failure is converted into an
//! error-status outcome here.

use crate::types::{ReviewSummary, SummaryOutcome};
use shopwise_core::AppError;
use shopwise_llm::{GenerationClient, GenerationRequest};
use shopwise_prompt::build_review_summary_prompt;
use std::sync::Arc;

/// Sentinel report for the empty-input case, which is a defined success.
pub const EMPTY_REVIEWS_REPORT: &str = "No reviews provided to summarize.";

/// Report when the generation capability rejects the review content.
pub const INVALID_CONTENT_REPORT: &str =
    "Summarization failed due to invalid review content.";

/// Report for any other summarization failure.
pub const SUMMARY_ERROR_REPORT: &str =
    "An unexpected error occurred during review summarization.";

/// Adapter over the generation capability for review summaries.
pub struct SummarizeAdapter {
    client: Arc<dyn GenerationClient>,
    model: String,
}

impl SummarizeAdapter {
    pub fn new(client: Arc<dyn GenerationClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Summarize a list of review texts.
    ///
    /// Empty input returns a success outcome with the sentinel message
    /// and a zero count. Otherwise the fixed-structure prompt is built
    /// and the generation capability invoked once.
    pub async fn summarize(&self, reviews: &[String]) -> SummaryOutcome {
        if reviews.is_empty() {
            return SummaryOutcome::success(
                EMPTY_REVIEWS_REPORT,
                ReviewSummary {
                    summary: EMPTY_REVIEWS_REPORT.to_string(),
                    review_count: 0,
                },
            );
        }

        let review_count = reviews.len();

        let prompt = match build_review_summary_prompt(reviews) {
            Ok(prompt) => prompt,
            Err(e) => return SummaryOutcome::failure(SUMMARY_ERROR_REPORT, e),
        };

        let request = GenerationRequest::new(prompt, &self.model);

        match self.client.generate(&request).await {
            Ok(response) => {
                tracing::info!("Summarized {} reviews", review_count);
                SummaryOutcome::success(
                    format!("Successfully summarized {} reviews.", review_count),
                    ReviewSummary {
                        summary: response.content,
                        review_count,
                    },
                )
            }
            Err(e @ AppError::GenerationValidation(_)) => {
                tracing::warn!("Generation rejected review content: {}", e);
                SummaryOutcome::failure(INVALID_CONTENT_REPORT, e)
            }
            Err(e) => {
                tracing::warn!("Summarization failed: {}", e);
                SummaryOutcome::failure(SUMMARY_ERROR_REPORT, e)
            }
        }
    }
}
