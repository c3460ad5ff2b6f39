use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::input_bar::InputBar;
use crate::components::message_list::MessageList;
use crate::config;
use crate::state::ChatStore;
use crate::workers::translate::TranslateWidget;

/// Root chat view: owns the store and service handles, wires the layout.
#[component]
pub fn App() -> impl IntoView {
    let store = ChatStore::new();
    let cfg = config::load();
    let widget = TranslateWidget::new();

    // The widget script loads once per page session.
    widget.ensure_loaded();

    provide_context(store);
    provide_context(cfg);
    provide_context(widget);

    view! {
        <div class="min-h-screen flex flex-col bg-gray-900 text-gray-100">
            <Header />
            <main class="flex-1 flex flex-col max-w-4xl mx-auto w-full">
                <MessageList />
                <InputBar />
            </main>
        </div>
    }
}
