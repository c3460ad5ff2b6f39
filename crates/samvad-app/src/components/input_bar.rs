use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, Url};

use samvad_groq::ApiConfig;

use crate::message::{AudioClip, Message};
use crate::state::ChatStore;
use crate::workers::{dispatch, recorder};

/// Input footer: attach a clip, type a message, send or record.
///
/// The trailing button is the send arrow while the buffer has text and the
/// microphone otherwise, mirroring what submitting would do.
#[component]
pub fn InputBar() -> impl IntoView {
    let store = expect_context::<ChatStore>();
    let cfg = expect_context::<ApiConfig>();

    let input_text = store.input_text;
    let recording = store.recording;

    let file_input: NodeRef<html::Input> = NodeRef::new();

    let send = {
        let store = store.clone();
        move || spawn_local(dispatch::send_text(store.clone(), cfg.clone()))
    };
    let on_send_click = {
        let send = send.clone();
        move |_: leptos::ev::MouseEvent| send()
    };
    let on_keydown = {
        let send = send.clone();
        move |ev: leptos::ev::KeyboardEvent| {
            if ev.key() == "Enter" {
                send();
            }
        }
    };

    let pick_file = move |_: leptos::ev::MouseEvent| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    // Uploads bypass the recorder entirely: wrap the picked file into a
    // playable clip and append it.
    let on_file_change = {
        let store = store.clone();
        move |ev: leptos::ev::Event| {
            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                match Url::create_object_url_with_blob(&file) {
                    Ok(object_url) => {
                        store.push(Message::UserAudio {
                            clip: AudioClip { object_url, file },
                            transcript: None,
                        });
                    }
                    Err(err) => log::error!("could not create object URL: {err:?}"),
                }
            }
            input.set_value("");
        }
    };

    let toggle_recording = {
        let store = store.clone();
        move |_: leptos::ev::MouseEvent| {
            if recording.get_untracked() {
                recorder::stop();
                recording.set(false);
            } else {
                let store = store.clone();
                spawn_local(async move {
                    match recorder::start(store).await {
                        Ok(()) => recording.set(true),
                        Err(err) => dispatch::alert(&format!("Recording failed: {err}")),
                    }
                });
            }
        }
    };

    view! {
        <div class="p-3 bg-gray-800 border-t border-gray-700 flex items-center gap-2">
            <button
                class="text-gray-300 hover:text-white px-1"
                on:click=pick_file
                title="Attach audio"
            >
                "\u{1F4CE}"
            </button>
            <input
                node_ref=file_input
                type="file"
                accept="audio/*"
                class="hidden"
                on:change=on_file_change
            />
            <input
                class="flex-1 px-3 py-2 rounded-md bg-gray-900 text-sm outline-none"
                placeholder="Message or type /chat \u{2026}"
                prop:value=move || input_text.get()
                on:input=move |ev| input_text.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
            {move || {
                if input_text.get().trim().is_empty() {
                    view! {
                        <button
                            class=move || {
                                if recording.get() {
                                    "text-red-500 px-1"
                                } else {
                                    "text-gray-300 hover:text-white px-1"
                                }
                            }
                            on:click=toggle_recording.clone()
                            title="Record audio"
                        >
                            "\u{1F3A4}"
                        </button>
                    }
                    .into_any()
                } else {
                    view! {
                        <button
                            class="text-gray-300 hover:text-white px-1"
                            on:click=on_send_click.clone()
                            title="Send"
                        >
                            "\u{27A4}"
                        </button>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
