//! Presentation utilities
//!
//! Pure helpers used by the UI layer: timestamp and size formatting,
//! URL detection, and upload validation.

pub mod format;
pub mod urls;
pub mod validation;

pub use format::{
    format_file_size, format_message_time, format_message_time_at, format_relative_time,
    format_relative_time_at, parse_timestamp, truncate_text,
};
pub use urls::{contains_url, detect_urls};
pub use validation::{validate_file, FileCandidate, FileCategory, ValidationResult};
