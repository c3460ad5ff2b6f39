//! Typed client for the two Groq HTTP APIs behind the Samvad chat UI:
//! audio transcription (multipart POST) and chat completion (JSON POST).
//!
//! Both endpoints are treated as opaque services: this crate builds the
//! request, checks the status, and parses the one field of the response the
//! UI consumes. No retries, no timeouts, no streaming.

pub mod chat;
pub mod config;
pub mod error;
mod fetch;
pub mod transcription;

pub use config::ApiConfig;
pub use error::ApiError;
