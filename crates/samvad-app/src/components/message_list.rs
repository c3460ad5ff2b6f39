use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use samvad_groq::ApiConfig;

use crate::message::{Message, Origin};
use crate::state::ChatStore;
use crate::workers::dispatch;
use crate::workers::translate::TranslateWidget;

/// Scrollable transcript: bubbles, audio players, and per-message actions.
#[component]
pub fn MessageList() -> impl IntoView {
    let store = expect_context::<ChatStore>();

    view! {
        <div class="flex-1 overflow-y-auto p-6 flex flex-col gap-4">
            {move || {
                store
                    .messages()
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(index, message)| view! { <MessageRow index message /> })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[component]
fn MessageRow(index: usize, message: Message) -> impl IntoView {
    let store = expect_context::<ChatStore>();
    let cfg = expect_context::<ApiConfig>();
    let widget = expect_context::<TranslateWidget>();
    let busy = store.busy;

    let align = if message.origin() == Origin::User {
        "items-end"
    } else {
        "items-start"
    };
    let bubble = match message.origin() {
        Origin::User => "bg-blue-500",
        Origin::Bot => "bg-green-600",
        Origin::System => "bg-gray-600",
    };

    let audio_url = message.audio().map(|clip| clip.object_url.clone());
    let transcript = message.transcript().map(str::to_string);
    let text = message.text().map(str::to_string);
    let has_audio = audio_url.is_some();
    let has_transcript = transcript.is_some();

    let on_transcribe = {
        let store = store.clone();
        let cfg = cfg.clone();
        move |_: leptos::ev::MouseEvent| {
            spawn_local(dispatch::transcribe(store.clone(), cfg.clone(), index));
        }
    };
    let on_translate = move |_: leptos::ev::MouseEvent| {
        if let Some(text) = &transcript {
            widget.render(text);
        }
    };

    view! {
        <div class=format!("flex flex-col gap-1 {align}")>
            {audio_url.map(|url| view! {
                <audio controls=true src=url class="w-full max-w-md"></audio>
            })}
            {text.map(|text| view! {
                <div class=format!(
                    "px-4 py-3 rounded-2xl max-w-[75%] whitespace-pre-wrap break-words text-white {bubble}"
                )>{text}</div>
            })}
            {(has_audio && !has_transcript).then(|| view! {
                <button
                    class="btn-primary mt-1 text-sm"
                    on:click=on_transcribe
                    disabled=move || busy.get()
                >
                    {move || if busy.get() { "Transcribing\u{2026}" } else { "Transcribe" }}
                </button>
            })}
            {has_transcript.then(|| view! {
                <button class="btn-secondary mt-1 text-sm" on:click=on_translate>
                    "Translate"
                </button>
            })}
        </div>
    }
}
