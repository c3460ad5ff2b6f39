use leptos::prelude::*;

use crate::workers::translate::WIDGET_ELEMENT_ID;

/// Top bar: app identity and the translation widget's mount point.
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="border-b border-gray-700 bg-gray-800/80 backdrop-blur-sm sticky top-0 z-50">
            <div class="max-w-4xl mx-auto px-4 py-3 flex items-center justify-between">
                <div class="flex items-center gap-3">
                    <h1 class="text-xl font-bold">"Samvad"</h1>
                    <span class="text-xs text-gray-400 hidden sm:inline">
                        "Chat \u{2022} Transcribe \u{2022} Translate"
                    </span>
                </div>
                <div id=WIDGET_ELEMENT_ID></div>
            </div>
        </header>
    }
}
