//! `shopwise summarize` - summarize a list of review texts.

use clap::Args;
use shopwise_core::{AppConfig, AppError, AppResult};
use shopwise_llm::create_client;
use shopwise_retrieval::SummarizeAdapter;
use std::path::PathBuf;

/// Summarize reviews passed as arguments or read from a file.
#[derive(Args, Debug)]
pub struct SummarizeCommand {
    /// Review texts to summarize
    reviews: Vec<String>,

    /// Read reviews from a file, one per line
    #[arg(long)]
    file: Option<PathBuf>,
}

impl SummarizeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut reviews = self.reviews.clone();

        if let Some(path) = &self.file {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                AppError::Validation(format!("Failed to read reviews file {:?}: {}", path, e))
            })?;
            reviews.extend(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            );
        }

        let client = create_client(
            &config.provider,
            config.endpoint.as_deref(),
            config.api_key.as_deref(),
        )?;
        let adapter = SummarizeAdapter::new(client, config.model.clone());

        let outcome = adapter.summarize(&reviews).await;

        println!("{}", serde_json::to_string_pretty(&outcome)?);
        Ok(())
    }
}
