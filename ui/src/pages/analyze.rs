//! Analysis page: topic input, run button and the returned sections

use crate::api;
use crate::components::{Header, LoadingSpinner, Report, SnippetList};
use crate::state::AppState;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn AnalyzePage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let run = {
        let state = state.clone();
        move || {
            if state.is_loading.get_untracked() {
                return;
            }
            let state = state.clone();
            let topic = state.topic.get_untracked();
            let base = state.api_base.get_untracked();

            state.is_loading.set(true);
            state.clear_error();

            spawn_local(async move {
                match api::analyze(&base, &topic).await {
                    Ok(result) => state.result.set(Some(result)),
                    Err(e) => {
                        tracing::warn!("analyze failed: {}", e);
                        state.set_error(format!("Error: {}", e));
                    }
                }
                state.is_loading.set(false);
            });
        }
    };

    let on_click = {
        let run = run.clone();
        move |_| run()
    };
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            run();
        }
    };

    let topic = state.topic;
    let is_loading = state.is_loading;
    let error = state.error;
    let result = state.result;

    view! {
        <Header />
        <div class="max-w-5xl mx-auto px-4 py-8 space-y-6">
            <div class="flex flex-col sm:flex-row gap-3">
                <input
                    type="text"
                    class="flex-1 px-4 py-3 rounded-lg bg-slate-800 border border-slate-700 focus:border-violet-500 focus:outline-none"
                    placeholder="Topic, e.g. a company name"
                    prop:value=move || topic.get()
                    on:input=move |ev| topic.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button
                    class="px-6 py-3 rounded-lg bg-violet-600 hover:bg-violet-700 disabled:opacity-50 font-medium flex items-center justify-center gap-2 transition-colors"
                    disabled=move || is_loading.get()
                    on:click=on_click
                >
                    <Show when=move || is_loading.get()>
                        <LoadingSpinner />
                    </Show>
                    "Run Analysis"
                </button>
            </div>

            {move || error.get().map(|msg| view! {
                <div class="px-4 py-3 rounded-lg bg-red-900/40 border border-red-700 text-red-200">
                    {msg}
                </div>
            })}

            {move || result.get().map(|r| view! {
                <div class="space-y-6">
                    {r.error.clone().map(|msg| view! {
                        <div class="px-4 py-3 rounded-lg bg-amber-900/40 border border-amber-700 text-amber-200">
                            {msg}
                        </div>
                    })}
                    <Report report=r.final_report.clone() />
                    <SnippetList title="Context used (snippets)" items=r.context_snippets.clone() />
                    <SnippetList title="Research notes" items=r.research_notes.clone() />
                </div>
            })}
        </div>
    }
}
