//! Prompt construction for search-result summaries

use super::models::ResultItem;

/// Number of results that make it into the prompt
pub const MAX_CONTEXT_ITEMS: usize = 5;

pub const MISSING_SNIPPET: &str = "No snippet available";

/// Numbered title/snippet blocks for the first few results
pub fn build_context(items: &[ResultItem]) -> String {
    items
        .iter()
        .take(MAX_CONTEXT_ITEMS)
        .enumerate()
        .map(|(i, item)| {
            format!(
                "[{}] Title: {}\nSnippet: {}",
                i + 1,
                item.title.as_deref().unwrap_or_default(),
                item.snippet_or_placeholder()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full instruction prompt for `query` over `items`
pub fn build_prompt(query: &str, items: &[ResultItem]) -> String {
    let context = build_context(items);

    format!(
        r#"You are a helpful search assistant. Based on the following search results for the query "{query}", provide a concise, accurate, and informative summary that directly answers the user's question.

Search Results:
{context}

Instructions:
- Provide a direct, factual answer to the query first
- Keep the summary to 2-3 sentences maximum
- Use the most recent and relevant information from the results
- If the query asks "who", "what", "when", etc., answer that specific question directly
- Do not include phrases like "Based on the search results" or "According to"
- Be concise and informative
- If there are dates or specific facts, include them

Summary:"#
    )
}
