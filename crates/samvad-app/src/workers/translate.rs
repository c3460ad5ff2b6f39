//! On-page translation widget handle.
//!
//! The third-party widget lives behind a window-scoped initializer that its
//! script invokes once loaded. This module wraps that global as an explicit
//! service: `ensure_loaded` injects the script tag once and installs the
//! callback, `render` rebuilds the translation target and asks the widget to
//! re-scan the page. Components receive the handle through context and never
//! touch the global themselves.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const SCRIPT_ID: &str = "google-translate-script";
const SCRIPT_SRC: &str =
    "//translate.google.com/translate_a/element.js?cb=googleTranslateElementInit";
const INIT_CALLBACK: &str = "googleTranslateElementInit";
const TARGET_ID: &str = "translate-target";

/// Id of the element the widget mounts its language picker into.
pub const WIDGET_ELEMENT_ID: &str = "google_translate_element";

/// Fixed widget configuration: page language and the offered locales.
pub const PAGE_LANGUAGE: &str = "en";
pub const INCLUDED_LANGUAGES: &str = "en,hi,kn,ta,ml,te,bn";

#[derive(Clone, Copy, Default)]
pub struct TranslateWidget;

impl TranslateWidget {
    pub fn new() -> Self {
        Self
    }

    /// Inject the widget script and its init callback. Idempotent: once the
    /// script tag exists, another call does nothing.
    pub fn ensure_loaded(&self) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };
        if document.get_element_by_id(SCRIPT_ID).is_some() {
            return;
        }

        let init = Closure::wrap(Box::new(|| {
            if let Err(err) = build_widget() {
                log::error!("translate widget init failed: {err:?}");
            }
        }) as Box<dyn FnMut()>);
        if js_sys::Reflect::set(&window, &JsValue::from_str(INIT_CALLBACK), init.as_ref()).is_err() {
            log::error!("could not install {INIT_CALLBACK}");
            return;
        }
        init.forget();

        let script = match document.create_element("script") {
            Ok(el) => el,
            Err(err) => {
                log::error!("could not create script element: {err:?}");
                return;
            }
        };
        let script: web_sys::HtmlScriptElement = match script.dyn_into() {
            Ok(el) => el,
            Err(_) => return,
        };
        script.set_id(SCRIPT_ID);
        script.set_src(SCRIPT_SRC);
        script.set_type("text/javascript");
        if let Some(body) = document.body() {
            let _ = body.append_child(&script);
        }
    }

    /// Replace the translation target with `text` and re-run the widget's
    /// initializer so it re-scans the page. Silently inert while the widget
    /// script has not finished loading.
    pub fn render(&self, text: &str) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        if let Some(existing) = document.get_element_by_id(TARGET_ID) {
            existing.remove();
        }
        let Ok(target) = document.create_element("div") else { return };
        target.set_id(TARGET_ID);
        target.set_text_content(Some(text));
        if let Some(body) = document.body() {
            let _ = body.append_child(&target);
        }

        let init = js_sys::Reflect::get(&window, &JsValue::from_str(INIT_CALLBACK))
            .unwrap_or(JsValue::UNDEFINED);
        if let Some(func) = init.dyn_ref::<js_sys::Function>() {
            let _ = func.call0(&window);
        }
    }
}

/// Construct the widget against its mount element. Runs from the script's
/// own callback, so the vendor global is present by then.
fn build_widget() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let google = js_sys::Reflect::get(&window, &JsValue::from_str("google"))?;
    let translate = js_sys::Reflect::get(&google, &JsValue::from_str("translate"))?;
    let element_ctor = js_sys::Reflect::get(&translate, &JsValue::from_str("TranslateElement"))?;
    let ctor: &js_sys::Function = element_ctor
        .dyn_ref()
        .ok_or_else(|| JsValue::from_str("TranslateElement is not a constructor"))?;

    let layout = js_sys::Reflect::get(&element_ctor, &JsValue::from_str("InlineLayout"))
        .and_then(|layouts| js_sys::Reflect::get(&layouts, &JsValue::from_str("SIMPLE")))
        .unwrap_or(JsValue::UNDEFINED);

    let config = js_sys::Object::new();
    js_sys::Reflect::set(&config, &"pageLanguage".into(), &PAGE_LANGUAGE.into())?;
    js_sys::Reflect::set(&config, &"includedLanguages".into(), &INCLUDED_LANGUAGES.into())?;
    js_sys::Reflect::set(&config, &"layout".into(), &layout)?;

    let args = js_sys::Array::of2(&config, &JsValue::from_str(WIDGET_ELEMENT_ID));
    js_sys::Reflect::construct(ctor, &args)?;
    Ok(())
}
