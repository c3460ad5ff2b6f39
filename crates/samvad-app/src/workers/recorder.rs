//! Microphone capture controller: Idle ⇄ Recording over MediaRecorder.
//!
//! The live browser handles are kept in thread-local cells for cleanup, the
//! way a single-threaded WASM module holds its capture state. Stopping
//! releases every media track so the browser drops its capture-device
//! indicator.

use std::cell::RefCell;

use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Blob, BlobEvent, BlobPropertyBag, File, FilePropertyBag, MediaRecorder, MediaStream,
    MediaStreamConstraints, Url,
};

use crate::message::{AudioClip, Message};
use crate::state::ChatStore;

/// File name given to finished recordings.
pub const RECORDED_FILE_NAME: &str = "recorded_audio";

/// Container type the recorder produces.
pub const RECORDED_MIME: &str = "audio/webm";

#[derive(Debug, Clone, Error)]
pub enum RecorderError {
    #[error("microphone access denied")]
    PermissionDenied,

    #[error("audio device error: {0}")]
    Device(String),
}

thread_local! {
    static RECORDER: RefCell<Option<MediaRecorder>> = RefCell::new(None);
    static MEDIA_STREAM: RefCell<Option<MediaStream>> = RefCell::new(None);
    static CHUNKS: RefCell<Vec<Blob>> = RefCell::new(Vec::new());
}

/// Acquire the microphone and start buffering chunks.
///
/// Only one session may be live at a time; a second start while recording is
/// refused (the caller also guards on the store's `recording` flag, so the
/// UI never reaches this path).
pub async fn start(store: ChatStore) -> Result<(), RecorderError> {
    if RECORDER.with(|r| r.borrow().is_some()) {
        return Err(RecorderError::Device("already recording".into()));
    }

    let window = web_sys::window().ok_or_else(|| RecorderError::Device("no window".into()))?;
    let media_devices = window.navigator().media_devices().map_err(device_err)?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    constraints.set_video(&JsValue::FALSE);

    let stream_promise = media_devices
        .get_user_media_with_constraints(&constraints)
        .map_err(device_err)?;
    let stream_js = wasm_bindgen_futures::JsFuture::from(stream_promise)
        .await
        .map_err(acquire_err)?;
    let stream: MediaStream = stream_js
        .dyn_into()
        .map_err(|_| RecorderError::Device("not a MediaStream".into()))?;

    let recorder = MediaRecorder::new_with_media_stream(&stream).map_err(device_err)?;

    CHUNKS.with(|c| c.borrow_mut().clear());
    let ondataavailable = Closure::wrap(Box::new(move |event: BlobEvent| {
        if let Some(data) = event.data() {
            if data.size() > 0.0 {
                CHUNKS.with(|c| c.borrow_mut().push(data));
            }
        }
    }) as Box<dyn FnMut(BlobEvent)>);
    recorder.set_ondataavailable(Some(ondataavailable.as_ref().unchecked_ref()));
    ondataavailable.forget();

    // Fires after stop(); assembles the buffered chunks into one playable
    // clip and appends it to the transcript.
    let onstop = Closure::wrap(Box::new(move || match finish_clip() {
        Ok(clip) => {
            store.push(Message::UserAudio {
                clip,
                transcript: None,
            });
        }
        Err(err) => log::error!("failed to assemble recording: {err:?}"),
    }) as Box<dyn FnMut()>);
    recorder.set_onstop(Some(onstop.as_ref().unchecked_ref()));
    onstop.forget();

    recorder.start().map_err(device_err)?;
    log::debug!("recording started");

    RECORDER.with(|r| *r.borrow_mut() = Some(recorder));
    MEDIA_STREAM.with(|m| *m.borrow_mut() = Some(stream));
    Ok(())
}

/// Stop capture and release the device. The finished clip lands in the store
/// from the recorder's stop callback; a stop with no live session is a
/// no-op.
pub fn stop() {
    RECORDER.with(|r| {
        if let Some(recorder) = r.borrow_mut().take() {
            let _ = recorder.stop();
        }
    });

    MEDIA_STREAM.with(|m| {
        if let Some(stream) = m.borrow_mut().take() {
            let tracks = stream.get_tracks();
            for i in 0..tracks.length() {
                let track = tracks.get(i);
                if !track.is_undefined() && !track.is_null() {
                    let track: web_sys::MediaStreamTrack = track.unchecked_into();
                    track.stop();
                }
            }
        }
    });
    log::debug!("recording stopped");
}

fn finish_clip() -> Result<AudioClip, JsValue> {
    let parts = js_sys::Array::new();
    CHUNKS.with(|c| {
        for chunk in c.borrow_mut().drain(..) {
            parts.push(&chunk);
        }
    });

    let blob_options = BlobPropertyBag::new();
    blob_options.set_type(RECORDED_MIME);
    let blob = Blob::new_with_blob_sequence_and_options(&parts, &blob_options)?;

    let file_options = FilePropertyBag::new();
    file_options.set_type(RECORDED_MIME);
    let file_parts = js_sys::Array::of1(&blob);
    let file = File::new_with_blob_sequence_and_options(&file_parts, RECORDED_FILE_NAME, &file_options)?;

    let object_url = Url::create_object_url_with_blob(&blob)?;
    Ok(AudioClip { object_url, file })
}

fn device_err(e: JsValue) -> RecorderError {
    RecorderError::Device(format!("{e:?}"))
}

/// getUserMedia rejections: an explicit denial maps to `PermissionDenied`,
/// everything else (no device, hardware failure) to `Device`.
fn acquire_err(e: JsValue) -> RecorderError {
    let denied = e
        .dyn_ref::<web_sys::DomException>()
        .map(|ex| {
            matches!(
                ex.name().as_str(),
                "NotAllowedError" | "PermissionDeniedError" | "SecurityError"
            )
        })
        .unwrap_or(false);
    if denied {
        RecorderError::PermissionDenied
    } else {
        RecorderError::Device(format!("{e:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_clip_identity() {
        assert_eq!(RECORDED_FILE_NAME, "recorded_audio");
        assert_eq!(RECORDED_MIME, "audio/webm");
    }

    #[test]
    fn error_messages_name_the_failure() {
        assert_eq!(
            RecorderError::PermissionDenied.to_string(),
            "microphone access denied"
        );
        assert_eq!(
            RecorderError::Device("no input".into()).to_string(),
            "audio device error: no input"
        );
    }
}
