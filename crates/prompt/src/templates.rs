//! Fixed prompt templates.

/// Template for the review-summary prompt.
///
/// The structure is fixed: the model is told to open with a sentence naming
/// the exact review count and to produce three labeled sections. The
/// reviews are injected as a bulleted list.
pub const REVIEW_SUMMARY_TEMPLATE: &str = "\
I will provide you with a list of customer reviews for a product.
Your task is to generate a concise summary of these reviews.
The summary should highlight:
1. Common positive aspects (pros).
2. Common negative aspects (cons).
3. An overall sentiment or recommendation.

Start your summary by stating the number of reviews considered, for example: \"Based on {{review_count}} reviews, here is a summary:\".
Please format your response clearly with headings for \"Positive Highlights\", \"Negative Aspects\", and \"Overall Summary\".

Here are the reviews:
{{#each reviews}}
- {{this}}
{{/each}}";
