//! Shared request plumbing over the browser fetch API.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::ApiError;

/// POST `body` to `url` with a bearer credential and return the response
/// body text. Non-2xx statuses become `RequestFailed` carrying the body.
///
/// `content_type` stays unset for multipart bodies so the browser can attach
/// its own boundary parameter.
pub(crate) async fn post(
    url: &str,
    bearer: &str,
    body: &JsValue,
    content_type: Option<&str>,
) -> Result<String, ApiError> {
    let headers = Headers::new().map_err(js_err)?;
    headers.set("Authorization", bearer).map_err(js_err)?;
    if let Some(ct) = content_type {
        headers.set("Content-Type", ct).map_err(js_err)?;
    }

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers.into());
    init.set_body(body);

    let request = Request::new_with_str_and_init(url, &init).map_err(js_err)?;
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;

    let resp_js = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    let response: Response = resp_js
        .dyn_into()
        .map_err(|_| ApiError::Network("not a Response".into()))?;

    let status = response.status();
    log::debug!("POST {url} -> HTTP {status}");
    let text_js = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    let body_text = text_js.as_string().unwrap_or_default();

    if !response.ok() {
        return Err(ApiError::from_status(status, &body_text));
    }
    Ok(body_text)
}

fn js_err(e: JsValue) -> ApiError {
    ApiError::Network(format!("{e:?}"))
}
