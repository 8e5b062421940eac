//! Upload validation
//!
//! Decides whether a file may be attached to a chat message. Validation
//! never fails with an error; callers inspect the returned
//! [`ValidationResult`].

use serde::Serialize;

/// Maximum upload size in bytes (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted for upload
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// File extensions accepted when the MIME type is not recognised
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".pdf", ".txt", ".doc", ".docx",
];

/// Error reported for files above [`MAX_FILE_SIZE`]
pub const FILE_TOO_LARGE_MESSAGE: &str = "File size exceeds the 10 MB limit";

/// Error reported for files matching neither allow-list
pub const UNSUPPORTED_TYPE_MESSAGE: &str =
    "Unsupported file type. Allowed: images, PDF, text and Word documents";

/// The properties of a file the validator looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileCandidate<'a> {
    /// File name, used for the extension fallback
    pub name: &'a str,
    /// Declared MIME type (may be empty)
    pub mime_type: &'a str,
    /// Size in bytes
    pub size: u64,
}

impl<'a> FileCandidate<'a> {
    /// Describe a file to validate
    pub fn new(name: &'a str, mime_type: &'a str, size: u64) -> Self {
        Self {
            name,
            mime_type,
            size,
        }
    }

    /// Lowercased extension including the leading dot, if the name has one
    pub fn extension(&self) -> Option<String> {
        self.name
            .rfind('.')
            .map(|idx| self.name[idx..].to_lowercase())
    }
}

/// Outcome of [`validate_file`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True when the file may be uploaded
    pub valid: bool,
    /// Human-readable reasons for rejection, in the order they were found
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn accepted() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    fn rejected(message: &str) -> Self {
        Self {
            valid: false,
            errors: vec![message.to_string()],
        }
    }
}

/// Check a file against the size limit and the type allow-lists
///
/// The size check runs first and short-circuits. The type check accepts an
/// allow-listed MIME type on its own and only consults the extension when
/// the MIME type is not recognised.
pub fn validate_file(file: &FileCandidate<'_>) -> ValidationResult {
    if file.size > MAX_FILE_SIZE {
        return ValidationResult::rejected(FILE_TOO_LARGE_MESSAGE);
    }

    if ALLOWED_MIME_TYPES.contains(&file.mime_type) {
        return ValidationResult::accepted();
    }

    match file.extension() {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => ValidationResult::accepted(),
        _ => ValidationResult::rejected(UNSUPPORTED_TYPE_MESSAGE),
    }
}

/// Comma-joined MIME types and extensions for an HTML `accept` attribute
pub fn accept_attribute() -> String {
    ALLOWED_MIME_TYPES
        .iter()
        .chain(ALLOWED_EXTENSIONS.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}

/// Display category of a file; the UI picks an icon per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Any `image/*` type
    Image,
    /// PDF documents
    Pdf,
    /// Plain text
    Text,
    /// Word documents (legacy and OOXML)
    Document,
    /// Anything else
    Other,
}

impl FileCategory {
    /// Classify by MIME type first, falling back to the file extension
    pub fn classify(file: &FileCandidate<'_>) -> Self {
        Self::from_mime_type(file.mime_type)
            .or_else(|| file.extension().and_then(|ext| Self::from_extension(&ext)))
            .unwrap_or(FileCategory::Other)
    }

    /// Lowercase name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Pdf => "pdf",
            FileCategory::Text => "text",
            FileCategory::Document => "document",
            FileCategory::Other => "other",
        }
    }

    fn from_mime_type(mime_type: &str) -> Option<Self> {
        let mime_type = mime_type.to_ascii_lowercase();
        match mime_type.as_str() {
            m if m.starts_with("image/") => Some(FileCategory::Image),
            "application/pdf" => Some(FileCategory::Pdf),
            "text/plain" => Some(FileCategory::Text),
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(FileCategory::Document)
            }
            _ => None,
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".jpg" | ".jpeg" | ".png" | ".gif" | ".webp" => Some(FileCategory::Image),
            ".pdf" => Some(FileCategory::Pdf),
            ".txt" => Some(FileCategory::Text),
            ".doc" | ".docx" => Some(FileCategory::Document),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_file_short_circuits() {
        let file = FileCandidate::new("a.png", "image/png", 11 * 1024 * 1024);
        let result = validate_file(&file);
        assert!(!result.valid);
        assert_eq!(result.errors, vec![FILE_TOO_LARGE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_oversized_unsupported_file_reports_size_only() {
        let file = FileCandidate::new("a.zip", "application/zip", MAX_FILE_SIZE + 1);
        assert_eq!(
            validate_file(&file).errors,
            vec![FILE_TOO_LARGE_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_exactly_max_size_is_allowed() {
        let file = FileCandidate::new("a.pdf", "application/pdf", MAX_FILE_SIZE);
        assert!(validate_file(&file).valid);
    }

    #[test]
    fn test_unsupported_type() {
        let file = FileCandidate::new("a.zip", "application/zip", 100);
        let result = validate_file(&file);
        assert!(!result.valid);
        assert_eq!(result.errors, vec![UNSUPPORTED_TYPE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_allowed_mime_type() {
        let file = FileCandidate::new("a.jpg", "image/jpeg", 100);
        let result = validate_file(&file);
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_extension_fallback_is_case_insensitive() {
        let file = FileCandidate::new("Report.DOCX", "", 2048);
        assert!(validate_file(&file).valid);

        let file = FileCandidate::new("scan.PDF", "application/octet-stream", 2048);
        assert!(validate_file(&file).valid);
    }

    #[test]
    fn test_allowed_mime_type_wins_over_extension() {
        let file = FileCandidate::new("payload.exe", "image/png", 100);
        assert!(validate_file(&file).valid);
    }

    #[test]
    fn test_missing_extension() {
        assert_eq!(FileCandidate::new("README", "", 10).extension(), None);
        assert!(!validate_file(&FileCandidate::new("README", "", 10)).valid);
    }

    #[test]
    fn test_extension_uses_last_dot() {
        let file = FileCandidate::new("archive.tar.GZ", "", 10);
        assert_eq!(file.extension().as_deref(), Some(".gz"));
    }

    #[test]
    fn test_accept_attribute() {
        let accept = accept_attribute();
        assert!(accept.starts_with("image/jpeg,"));
        assert!(accept.ends_with(",.docx"));
        assert_eq!(
            accept.split(',').count(),
            ALLOWED_MIME_TYPES.len() + ALLOWED_EXTENSIONS.len()
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            FileCategory::classify(&FileCandidate::new("a.svg", "image/svg+xml", 1)),
            FileCategory::Image
        );
        assert_eq!(
            FileCategory::classify(&FileCandidate::new("a.bin", "application/pdf", 1)),
            FileCategory::Pdf
        );
        assert_eq!(
            FileCategory::classify(&FileCandidate::new("notes.TXT", "", 1)),
            FileCategory::Text
        );
        assert_eq!(
            FileCategory::classify(&FileCandidate::new("cv.doc", "application/octet-stream", 1)),
            FileCategory::Document
        );
        assert_eq!(
            FileCategory::classify(&FileCandidate::new("a.zip", "application/zip", 1)),
            FileCategory::Other
        );
        assert_eq!(FileCategory::Document.as_str(), "document");
    }
}
