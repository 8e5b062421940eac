//! API module
//!
//! HTTP client for the chat backend and the payloads it sends.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{Attachment, AttachmentMessage, ChatRequest, FeedbackRequest};
