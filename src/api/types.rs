//! Request payload types
//!
//! Response bodies are not typed: the backend's JSON is handed back as a
//! [`serde_json::Value`] without schema enforcement.

use crate::error::ApiError;
use crate::utils::validation::FileCandidate;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// Payload for `POST /chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// Message text
    pub message: String,
    /// Session the message belongs to (None starts a new session)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Sender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Any further fields the backend accepts
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatRequest {
    /// Create a chat payload with just a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Attach the payload to an existing session
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the sending user
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Payload for `POST /feedback`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedbackRequest {
    /// Session the rated message belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Rated message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Numeric rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    /// Free-text comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Any further fields the backend accepts
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Text fields sent alongside attachments to `POST /chat/with-attachments`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentMessage {
    /// Message text
    pub message: String,
    /// Session the message belongs to
    pub session_id: Option<String>,
    /// Sender
    pub user_id: Option<String>,
}

impl AttachmentMessage {
    /// Build the multipart form: text fields first, then one `files` part per attachment
    pub(crate) fn into_form(self, attachments: Vec<Attachment>) -> Result<Form, ApiError> {
        let mut form = Form::new().text("message", self.message);
        if let Some(session_id) = self.session_id {
            form = form.text("session_id", session_id);
        }
        if let Some(user_id) = self.user_id {
            form = form.text("user_id", user_id);
        }
        for attachment in attachments {
            form = form.part("files", attachment.into_part()?);
        }
        Ok(form)
    }
}

/// A file to upload with a chat message
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// File name reported to the backend
    pub file_name: String,
    /// Declared MIME type
    pub mime_type: String,
    /// File contents
    pub data: Vec<u8>,
}

impl Attachment {
    /// Create an attachment from in-memory contents
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Read an attachment from disk, guessing its MIME type from the extension
    ///
    /// # Arguments
    /// * `path` - File to read; its file name is reported to the backend
    ///
    /// # Returns
    /// * `Ok(Attachment)` - Contents, file name and guessed MIME type
    ///   (`application/octet-stream` when the extension is unknown)
    /// * `Err(ApiError)` - If the file cannot be read
    ///
    /// # Errors
    /// * Returns `ApiError::Attachment` if the file cannot be read or the path
    ///   has no UTF-8 file name
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let data = fs::read(path).await.map_err(|e| {
            ApiError::Attachment(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Attachment(format!("No file name in {}", path.display())))?
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file_name,
            mime_type,
            data,
        })
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// View this attachment as an upload candidate for validation
    pub fn candidate(&self) -> FileCandidate<'_> {
        FileCandidate::new(&self.file_name, &self.mime_type, self.size())
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.data)
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)
            .map_err(|e| {
                ApiError::Attachment(format!(
                    "Invalid MIME type {:?} for {}: {}",
                    self.mime_type, self.file_name, e
                ))
            })
    }
}

/// Body of `POST /parse-url`
#[derive(Debug, Serialize)]
pub(crate) struct ParseUrlBody<'a> {
    pub url: &'a str,
}

/// Body of `POST /knowledge`
#[derive(Debug, Serialize)]
pub(crate) struct KnowledgeBody<'a> {
    pub text: &'a str,
    pub category: &'a str,
}

/// Body of `POST /emotion-examples`
#[derive(Debug, Serialize)]
pub(crate) struct EmotionExampleBody<'a> {
    pub text: &'a str,
    pub emotion: &'a str,
    pub intensity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_chat_request_skips_missing_fields() {
        let request = ChatRequest::new("hello");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"message": "hello"}));
    }

    #[test]
    fn test_chat_request_flattens_extra_fields() {
        let mut request = ChatRequest::new("hi").with_session("s1").with_user("u1");
        request
            .extra
            .insert("language".to_string(), json!("en"));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"message": "hi", "session_id": "s1", "user_id": "u1", "language": "en"})
        );
    }

    #[test]
    fn test_feedback_request_serialization() {
        let request = FeedbackRequest {
            message_id: Some("m1".to_string()),
            rating: Some(5),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"message_id": "m1", "rating": 5}));
    }

    #[test]
    fn test_attachment_candidate_reflects_contents() {
        let attachment = Attachment::new("notes.txt", "text/plain", b"abc".to_vec());
        let candidate = attachment.candidate();
        assert_eq!(candidate.name, "notes.txt");
        assert_eq!(candidate.mime_type, "text/plain");
        assert_eq!(candidate.size, 3);
    }

    #[test]
    fn test_invalid_mime_type_is_rejected() {
        let attachment = Attachment::new("weird.bin", "not a mime", vec![0u8; 4]);
        let result = AttachmentMessage::default().into_form(vec![attachment]);
        match result {
            Err(ApiError::Attachment(msg)) => assert!(msg.contains("weird.bin")),
            other => panic!("Expected Attachment error, got: {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_attachment_from_path_guesses_mime_type() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("photo.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).expect("Failed to write file");

        let attachment = Attachment::from_path(&path).await.unwrap();
        assert_eq!(attachment.file_name, "photo.png");
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.size(), 4);
    }

    #[tokio::test]
    async fn test_attachment_from_missing_path() {
        let result = Attachment::from_path("/nonexistent/path/12345.pdf").await;
        assert!(matches!(result, Err(ApiError::Attachment(_))));
    }
}
