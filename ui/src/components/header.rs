//! Header component

use leptos::prelude::*;

/// Main application header
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="h-16 sticky top-0 z-40 border-b border-slate-800 bg-slate-900/90 backdrop-blur">
            <div class="h-full max-w-5xl mx-auto px-4 flex items-center justify-between">
                <a href="/" class="hover:opacity-80 transition-opacity">
                    <h1 class="text-xl font-bold bg-gradient-to-r from-fuchsia-400 to-violet-500 bg-clip-text text-transparent">
                        "rival"
                    </h1>
                    <p class="text-xs text-slate-500 -mt-0.5">"Ecommerce Competitor Analysis"</p>
                </a>
                <a
                    href="/swagger-ui/"
                    class="text-sm text-slate-400 hover:text-slate-200 transition-colors"
                >
                    "API"
                </a>
            </div>
        </header>
    }
}
