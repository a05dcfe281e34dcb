//! Executive report rendering

use leptos::prelude::*;
use pulldown_cmark::{html, Options, Parser};

/// Shown when the draft stage produced nothing
pub const NO_REPORT: &str = "No report";

/// Markdown to HTML, with tables and strikethrough enabled
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Render markdown content
#[component]
pub fn Markdown(content: String) -> impl IntoView {
    let rendered = markdown_to_html(&content);
    view! { <div class="report leading-relaxed text-slate-200" inner_html=rendered></div> }
}

/// The report section, with a placeholder when there is none
#[component]
pub fn Report(report: Option<String>) -> impl IntoView {
    view! {
        <section class="bg-slate-800/60 border border-slate-700 rounded-xl p-6">
            <h2 class="text-lg font-semibold mb-3">"Executive Report"</h2>
            {match report.filter(|r| !r.trim().is_empty()) {
                Some(content) => view! { <Markdown content=content /> }.into_any(),
                None => view! { <p class="text-slate-500 italic">{NO_REPORT}</p> }.into_any(),
            }}
        </section>
    }
}
