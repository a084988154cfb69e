//! Query router.
//!
//! Given a parsed request and a strategy hint, selects which retrieval
//! path to invoke and fans independent sub-queries out concurrently. The
//! router performs no cross-call merging or ranking; each outcome is
//! returned in its own envelope and combining them belongs to the
//! presentation layer.

use crate::filter::{ItemFilterParams, ReviewFilterParams};
use crate::gateway::RetrievalGateway;
use crate::normalize::NormalizedRecord;
use crate::types::{BackendId, RetrievalOutcome, SearchRequest};
use futures::future::join_all;
use shopwise_core::{AppError, AppResult};
use std::sync::Arc;

/// Collaborator that compiles a natural-language question into SQL,
/// executes it read-only, and returns rows. Internals (schema
/// introspection, sample-value caching) are external to this core.
#[async_trait::async_trait]
pub trait StructuredQueryEngine: Send + Sync {
    async fn execute(&self, question: &str) -> AppResult<Vec<NormalizedRecord>>;
}

/// Collaborator that expands a topic through generative research.
#[async_trait::async_trait]
pub trait ResearchEngine: Send + Sync {
    async fn research(&self, topic: &str) -> AppResult<Vec<NormalizedRecord>>;
}

/// One routed sub-query with its strategy hint.
#[derive(Debug, Clone)]
pub enum RoutedQuery {
    /// Filtered full-text search against one datastore
    FilteredSearch(SearchRequest),

    /// Aggregate or sorted query delegated to the structured-query
    /// collaborator
    Analytic { question: String },

    /// Research expansion delegated to the research collaborator
    Research { topic: String },
}

/// Routes requests to the gateway or to optional collaborators.
pub struct QueryRouter {
    gateway: Arc<RetrievalGateway>,
    analytic: Option<Arc<dyn StructuredQueryEngine>>,
    research: Option<Arc<dyn ResearchEngine>>,
}

impl QueryRouter {
    pub fn new(gateway: Arc<RetrievalGateway>) -> Self {
        Self {
            gateway,
            analytic: None,
            research: None,
        }
    }

    /// Attach the structured-query collaborator.
    pub fn with_analytic(mut self, engine: Arc<dyn StructuredQueryEngine>) -> Self {
        self.analytic = Some(engine);
        self
    }

    /// Attach the research collaborator.
    pub fn with_research(mut self, engine: Arc<dyn ResearchEngine>) -> Self {
        self.research = Some(engine);
        self
    }

    /// Search the item metadata datastore with the item constraint
    /// profile.
    pub async fn search_items(
        &self,
        query: impl Into<String>,
        params: &ItemFilterParams,
    ) -> RetrievalOutcome {
        let request = SearchRequest::new(query, BackendId::Item)
            .with_constraints(params.constraints());
        self.gateway.search(request).await
    }

    /// Search the review metadata datastore with the review constraint
    /// profile.
    pub async fn search_reviews(
        &self,
        query: impl Into<String>,
        params: &ReviewFilterParams,
    ) -> RetrievalOutcome {
        let request = SearchRequest::new(query, BackendId::Review)
            .with_constraints(params.constraints());
        self.gateway.search(request).await
    }

    /// Fan out independent sub-queries concurrently.
    ///
    /// All calls are dispatched before any is awaited, and the combined
    /// result reflects completion of every one of them: one outcome per
    /// sub-query, in input order, each independently success or error.
    /// A failing call never blocks or fails the others.
    pub async fn dispatch(&self, queries: Vec<RoutedQuery>) -> Vec<RetrievalOutcome> {
        tracing::info!("Dispatching {} routed sub-queries", queries.len());
        let calls = queries.into_iter().map(|q| self.route(q));
        join_all(calls).await
    }

    /// Route one sub-query by its strategy.
    pub async fn route(&self, query: RoutedQuery) -> RetrievalOutcome {
        match query {
            RoutedQuery::FilteredSearch(request) => self.gateway.search(request).await,
            RoutedQuery::Analytic { question } => match &self.analytic {
                Some(engine) => {
                    Self::collaborator_outcome("structured_query", engine.execute(&question).await)
                }
                None => RetrievalOutcome::failure(AppError::Config(
                    "No structured query engine is configured".to_string(),
                )),
            },
            RoutedQuery::Research { topic } => match &self.research {
                Some(engine) => {
                    Self::collaborator_outcome("research", engine.research(&topic).await)
                }
                None => RetrievalOutcome::failure(AppError::Config(
                    "No research engine is configured".to_string(),
                )),
            },
        }
    }

    fn collaborator_outcome(
        source: &str,
        result: AppResult<Vec<NormalizedRecord>>,
    ) -> RetrievalOutcome {
        match result {
            Ok(records) => RetrievalOutcome::success(source, records),
            Err(e) => {
                tracing::warn!("Collaborator {} failed: {}", source, e);
                RetrievalOutcome::failure(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SearchBackend;
    use crate::normalize::NormalizedValue;
    use crate::types::Status;
    use serde_json::{json, Value};
    use shopwise_core::{AppConfig, Location, SettingsCache};

    /// Backend double that fails for one poison query and succeeds for
    /// everything else.
    struct SplitBackend;

    #[async_trait::async_trait]
    impl SearchBackend for SplitBackend {
        async fn search(
            &self,
            _location: Location,
            _serving_config: &str,
            query: &str,
            _page_size: u32,
            _filter: Option<&str>,
        ) -> AppResult<Vec<Value>> {
            if query == "boom" {
                Err(AppError::Backend("simulated outage".to_string()))
            } else {
                Ok(vec![json!({"title": {"stringValue": query}})])
            }
        }
    }

    fn test_router() -> QueryRouter {
        let mut config = AppConfig::default();
        config.project_id = Some("test-project".to_string());
        config.item_datastore_id = Some("item-ds".to_string());
        config.review_datastore_id = Some("review-ds".to_string());

        let gateway = RetrievalGateway::new(
            Arc::new(SettingsCache::new(config)),
            Arc::new(SplitBackend),
        );
        QueryRouter::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_partial_success_on_fan_out() {
        let router = test_router();

        let outcomes = router
            .dispatch(vec![
                RoutedQuery::FilteredSearch(SearchRequest::new("running shoes", BackendId::Item)),
                RoutedQuery::FilteredSearch(SearchRequest::new("boom", BackendId::Review)),
            ])
            .await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].status, Status::Success);
        assert_eq!(outcomes[1].status, Status::Error);
        assert!(outcomes[1].error.as_deref().unwrap().contains("simulated outage"));
    }

    #[tokio::test]
    async fn test_outcomes_preserve_input_order() {
        let router = test_router();

        let outcomes = router
            .dispatch(vec![
                RoutedQuery::FilteredSearch(SearchRequest::new("first", BackendId::Item)),
                RoutedQuery::FilteredSearch(SearchRequest::new("second", BackendId::Item)),
            ])
            .await;

        let title = |i: usize| {
            outcomes[i].data.as_ref().unwrap().records[0]
                .get("title")
                .cloned()
        };
        assert_eq!(title(0), Some(NormalizedValue::Text("first".to_string())));
        assert_eq!(title(1), Some(NormalizedValue::Text("second".to_string())));
    }

    #[tokio::test]
    async fn test_search_items_applies_profile() {
        let router = test_router();
        let params = ItemFilterParams {
            min_avg_rating: Some(4.0),
            ..Default::default()
        };

        let outcome = router.search_items("running shoes", &params).await;
        assert_eq!(outcome.status, Status::Success);
        assert_eq!(outcome.data.unwrap().source, "item-ds");
    }

    #[tokio::test]
    async fn test_analytic_without_collaborator_is_error_outcome() {
        let router = test_router();

        let outcome = router
            .route(RoutedQuery::Analytic {
                question: "average price per category".to_string(),
            })
            .await;

        assert_eq!(outcome.status, Status::Error);
        assert!(outcome.error.unwrap().contains("structured query engine"));
    }

    struct FixedEngine;

    #[async_trait::async_trait]
    impl StructuredQueryEngine for FixedEngine {
        async fn execute(&self, _question: &str) -> AppResult<Vec<NormalizedRecord>> {
            let mut row = NormalizedRecord::new();
            row.insert(
                "category".to_string(),
                NormalizedValue::Text("shoes".to_string()),
            );
            Ok(vec![row])
        }
    }

    #[tokio::test]
    async fn test_analytic_with_collaborator() {
        let router = test_router().with_analytic(Arc::new(FixedEngine));

        let outcome = router
            .route(RoutedQuery::Analytic {
                question: "average price per category".to_string(),
            })
            .await;

        assert_eq!(outcome.status, Status::Success);
        let data = outcome.data.unwrap();
        assert_eq!(data.source, "structured_query");
        assert_eq!(data.records.len(), 1);
    }
}
