//! Fixed instructions and prompt templates.

/// System instruction for per-result summaries
pub const SUMMARIZE_SYSTEM: &str = "Summarize this for e-commerce competitor intelligence (pricing, logistics, CX, market share).";

/// System instruction for the final report
pub const DRAFT_SYSTEM: &str =
    "You produce accurate, concise reports for executives using provided context only.";

/// Placeholder used in the draft prompt when nothing was retrieved
pub const NO_CONTEXT: &str = "NO_CONTEXT";

/// `"<topic> <suffix>"`
pub fn search_query(topic: &str, suffix: &str) -> String {
    format!("{} {}", topic, suffix)
}

/// Report prompt grounded on the retrieved snippets
pub fn draft_prompt(topic: &str, snippets: &[String]) -> String {
    let context = if snippets.is_empty() {
        NO_CONTEXT.to_string()
    } else {
        snippets.join("\n\n")
    };

    format!(
        r#"
Topic: {topic}

You are an expert analyst for the ecommerce industry.

Write a competitor analysis report including:
- Executive Summary
- Key Ecommerce Trends
- Major Competitors (Walmart, Alibaba, Flipkart, Target, etc.)
- Comparative Matrix (pricing, logistics, delivery time, app UX, product range)
- Strengths & Weaknesses of each competitor
- Opportunities & Risks for {topic}
- Strategic Recommendations (delivery, pricing, marketplace model, AI)

Use ONLY the context below. If context is weak, say so and keep claims conservative.

Context:
{context}
"#
    )
}
