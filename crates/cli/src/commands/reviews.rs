//! `shopwise reviews` - filtered search over the review metadata datastore.

use clap::Args;
use shopwise_core::{AppResult, SettingsCache};
use shopwise_retrieval::types::{BackendId, DEFAULT_MAX_RESULTS};
use shopwise_retrieval::{
    QueryRouter, RetrievalGateway, ReviewFilterParams, RoutedQuery, SearchRequest,
};
use std::sync::Arc;

/// Search reviews with filters on rating, helpful votes, and parent ASIN.
#[derive(Args, Debug)]
pub struct ReviewsCommand {
    /// Natural language search query
    query: String,

    /// Minimum rating for the review (e.g., 4.0)
    #[arg(long)]
    min_rating: Option<f64>,

    /// Maximum rating for the review (e.g., 5.0)
    #[arg(long)]
    max_rating: Option<f64>,

    /// Minimum number of helpful votes (e.g., 5)
    #[arg(long)]
    min_helpful_votes: Option<i64>,

    /// Parent ASIN identifier to scope reviews to one product
    #[arg(long)]
    parent_asin: Option<String>,

    /// Maximum number of results
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,
}

impl ReviewsCommand {
    pub async fn execute(&self, settings: Arc<SettingsCache>) -> AppResult<()> {
        let gateway = Arc::new(RetrievalGateway::discovery(settings));
        let router = QueryRouter::new(gateway);

        let params = ReviewFilterParams {
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            min_helpful_votes: self.min_helpful_votes,
            parent_asin: self.parent_asin.clone(),
        };

        let request = SearchRequest::new(self.query.clone(), BackendId::Review)
            .with_constraints(params.constraints())
            .with_max_results(self.max_results);
        let outcome = router.route(RoutedQuery::FilteredSearch(request)).await;

        println!("{}", serde_json::to_string_pretty(&outcome)?);
        Ok(())
    }
}
