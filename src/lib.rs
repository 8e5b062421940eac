//! Chat API Client Library
//!
//! Data-access layer for the chat frontend: a REST client for the chat
//! backend plus formatting and upload-validation helpers.
//! The probe binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod utils;

pub use api::ApiClient;
pub use config::Config;
pub use error::ApiError;
