//! Numbered list of notes or context snippets

use leptos::prelude::*;

/// A titled, numbered list; shows an empty hint when there are no items
#[component]
pub fn SnippetList(title: &'static str, items: Vec<String>) -> impl IntoView {
    let count = items.len();

    let body = if items.is_empty() {
        view! { <p class="text-slate-500 italic">"None"</p> }.into_any()
    } else {
        view! {
            <ol class="list-decimal pl-6 space-y-2 text-slate-300">
                {items.into_iter().map(|item| view! {
                    <li class="whitespace-pre-wrap break-words">{item}</li>
                }).collect::<Vec<_>>()}
            </ol>
        }
        .into_any()
    };

    view! {
        <section class="bg-slate-800/40 border border-slate-700 rounded-xl p-6">
            <h2 class="text-lg font-semibold mb-3">
                {title}
                <span class="ml-2 text-sm text-slate-500">{format!("({})", count)}</span>
            </h2>
            {body}
        </section>
    }
}
