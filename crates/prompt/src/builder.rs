//! Prompt builder for rendering templates with request data.

use crate::templates::REVIEW_SUMMARY_TEMPLATE;
use handlebars::Handlebars;
use serde_json::json;
use shopwise_core::{AppError, AppResult};

/// Build the review-summary prompt for a non-empty list of reviews.
///
/// Renders the fixed summary template with the review count and the
/// reviews as a bulleted list. Callers handle the empty case before
/// reaching this function.
pub fn build_review_summary_prompt(reviews: &[String]) -> AppResult<String> {
    tracing::debug!("Building review summary prompt for {} reviews", reviews.len());

    let data = json!({
        "review_count": reviews.len(),
        "reviews": reviews,
    });

    render_template(REVIEW_SUMMARY_TEMPLATE, &data)
}

/// Render a Handlebars template with the given data.
fn render_template(template: &str, data: &serde_json::Value) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Other(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", data)
        .map_err(|e| AppError::Other(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}
