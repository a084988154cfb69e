//! `shopwise items` - filtered search over the item metadata datastore.

use clap::Args;
use shopwise_core::{AppResult, SettingsCache};
use shopwise_retrieval::types::{BackendId, DEFAULT_MAX_RESULTS};
use shopwise_retrieval::{
    ItemFilterParams, QueryRouter, RetrievalGateway, RoutedQuery, SearchRequest,
};
use std::sync::Arc;

/// Search items with filters on price, average rating, and rating count.
#[derive(Args, Debug)]
pub struct ItemsCommand {
    /// Natural language search query
    query: String,

    /// Minimum average rating (e.g., 4.0)
    #[arg(long)]
    min_avg_rating: Option<f64>,

    /// Maximum average rating (e.g., 4.5)
    #[arg(long)]
    max_avg_rating: Option<f64>,

    /// Minimum number of ratings (e.g., 100)
    #[arg(long)]
    min_rating_number: Option<i64>,

    /// Maximum price (e.g., 50.00)
    #[arg(long)]
    max_price: Option<f64>,

    /// Parent ASIN identifier for an exact product match
    #[arg(long)]
    parent_asin: Option<String>,

    /// Maximum number of results
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,
}

impl ItemsCommand {
    pub async fn execute(&self, settings: Arc<SettingsCache>) -> AppResult<()> {
        let gateway = Arc::new(RetrievalGateway::discovery(settings));
        let router = QueryRouter::new(gateway);

        let params = ItemFilterParams {
            min_avg_rating: self.min_avg_rating,
            max_avg_rating: self.max_avg_rating,
            min_rating_number: self.min_rating_number,
            max_price: self.max_price,
            parent_asin: self.parent_asin.clone(),
        };

        let request = SearchRequest::new(self.query.clone(), BackendId::Item)
            .with_constraints(params.constraints())
            .with_max_results(self.max_results);
        let outcome = router.route(RoutedQuery::FilteredSearch(request)).await;

        println!("{}", serde_json::to_string_pretty(&outcome)?);
        Ok(())
    }
}
