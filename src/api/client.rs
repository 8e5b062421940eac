//! Chat backend API client
//!
//! One method per backend endpoint. Every method issues exactly one request,
//! returns the JSON body untouched on success, and logs any failure before
//! handing it back to the caller. There is no retry and no timeout.

use crate::api::types::{
    Attachment, AttachmentMessage, EmotionExampleBody, KnowledgeBody, ParseUrlBody,
};
use crate::config::ApiConfig;
use crate::error::ApiError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

/// Default `limit` for session history
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// Default `limit` for a user's session list
pub const DEFAULT_SESSIONS_LIMIT: u32 = 50;

/// Default knowledge category
pub const DEFAULT_KNOWLEDGE_CATEGORY: &str = "general";

/// HTTP client for the chat backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing a caller-built `reqwest::Client`
    pub fn with_http_client(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL every path is resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a chat message (`POST /chat`)
    ///
    /// # Arguments
    /// * `payload` - JSON message payload, e.g. a `ChatRequest`
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::Encode` if the payload cannot be serialized
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn send_message<T>(&self, payload: &T) -> Result<Value, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.execute("send_message", Method::POST, &["chat"], |req| {
            json_body(req, payload)
        })
        .await
    }

    /// Send a chat message with files (`POST /chat/with-attachments`, `multipart/form-data`)
    ///
    /// # Arguments
    /// * `message` - Text fields of the form
    /// * `attachments` - Files sent as `files` parts
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::Attachment` if an attachment has an invalid MIME type
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn send_message_with_attachments(
        &self,
        message: AttachmentMessage,
        attachments: Vec<Attachment>,
    ) -> Result<Value, ApiError> {
        self.execute(
            "send_message_with_attachments",
            Method::POST,
            &["chat", "with-attachments"],
            |req| Ok(req.multipart(message.into_form(attachments)?)),
        )
        .await
    }

    /// Submit feedback on a reply (`POST /feedback`)
    ///
    /// # Arguments
    /// * `payload` - JSON feedback payload, e.g. a `FeedbackRequest`
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::Encode` if the payload cannot be serialized
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn submit_feedback<T>(&self, payload: &T) -> Result<Value, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.execute("submit_feedback", Method::POST, &["feedback"], |req| {
            json_body(req, payload)
        })
        .await
    }

    /// Fetch aggregated feedback statistics (`GET /feedback/statistics`)
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn get_feedback_statistics(&self) -> Result<Value, ApiError> {
        self.execute(
            "get_feedback_statistics",
            Method::GET,
            &["feedback", "statistics"],
            Ok,
        )
        .await
    }

    /// Ask the backend to parse a link (`POST /parse-url`)
    ///
    /// # Arguments
    /// * `url` - The URL to parse, sent as `{url}`
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn parse_url(&self, url: &str) -> Result<Value, ApiError> {
        self.execute("parse_url", Method::POST, &["parse-url"], |req| {
            json_body(req, &ParseUrlBody { url })
        })
        .await
    }

    /// Fetch a session's message history (`GET /sessions/{id}/history?limit=`)
    ///
    /// # Arguments
    /// * `session_id` - Session to read
    /// * `limit` - Maximum number of messages (default: 20)
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::InvalidUrl` if the id is empty, `.` or `..`
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn get_session_history(
        &self,
        session_id: &str,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        self.execute(
            "get_session_history",
            Method::GET,
            &["sessions", session_id, "history"],
            |req| Ok(req.query(&[("limit", limit)])),
        )
        .await
    }

    /// Fetch a session summary (`GET /sessions/{id}/summary`)
    ///
    /// # Arguments
    /// * `session_id` - Session to summarize
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::InvalidUrl` if the id is empty, `.` or `..`
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn get_session_summary(&self, session_id: &str) -> Result<Value, ApiError> {
        self.execute(
            "get_session_summary",
            Method::GET,
            &["sessions", session_id, "summary"],
            Ok,
        )
        .await
    }

    /// Add a knowledge entry (`POST /knowledge`)
    ///
    /// # Arguments
    /// * `text` - Knowledge text
    /// * `category` - Category (default: "general")
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn add_knowledge(
        &self,
        text: &str,
        category: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = KnowledgeBody {
            text,
            category: category.unwrap_or(DEFAULT_KNOWLEDGE_CATEGORY),
        };
        self.execute("add_knowledge", Method::POST, &["knowledge"], |req| {
            json_body(req, &body)
        })
        .await
    }

    /// Add a labelled emotion example (`POST /emotion-examples`)
    ///
    /// # Arguments
    /// * `text` - Example text
    /// * `emotion` - Emotion label
    /// * `intensity` - Emotion intensity
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn add_emotion_example(
        &self,
        text: &str,
        emotion: &str,
        intensity: f64,
    ) -> Result<Value, ApiError> {
        let body = EmotionExampleBody {
            text,
            emotion,
            intensity,
        };
        self.execute(
            "add_emotion_example",
            Method::POST,
            &["emotion-examples"],
            |req| json_body(req, &body),
        )
        .await
    }

    /// List a user's sessions (`GET /users/{id}/sessions?limit=`)
    ///
    /// # Arguments
    /// * `user_id` - User whose sessions to list
    /// * `limit` - Maximum number of sessions (default: 50)
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::InvalidUrl` if the id is empty, `.` or `..`
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn get_user_sessions(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_SESSIONS_LIMIT);
        self.execute(
            "get_user_sessions",
            Method::GET,
            &["users", user_id, "sessions"],
            |req| Ok(req.query(&[("limit", limit)])),
        )
        .await
    }

    /// Delete a session (`DELETE /sessions/{id}`)
    ///
    /// # Arguments
    /// * `session_id` - Session to delete
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::InvalidUrl` if the id is empty, `.` or `..`
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn delete_session(&self, session_id: &str) -> Result<Value, ApiError> {
        self.execute(
            "delete_session",
            Method::DELETE,
            &["sessions", session_id],
            Ok,
        )
        .await
    }

    /// Check backend health (`GET /health`)
    ///
    /// # Returns
    /// * `Ok(Value)` - The response body, unchanged
    /// * `Err(ApiError)` - If the request failed (already logged)
    ///
    /// # Errors
    /// * Returns `ApiError::Network` if the backend cannot be reached
    /// * Returns `ApiError::Status` if the backend answers with a non-2xx status
    /// * Returns `ApiError::Decode` if a 2xx body is not JSON
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        self.execute("health_check", Method::GET, &["health"], Ok)
            .await
    }

    /// Resolve path segments against the base URL, percent-encoding each segment
    ///
    /// Empty, `.` and `..` segments are rejected: the URL parser would drop
    /// them and the request would land on a different resource.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ApiError::InvalidUrl(format!(
                "Invalid path segment {:?} in /{}",
                bad,
                segments.join("/")
            )));
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build, send and decode one request, logging the failure if there is one
    async fn execute<F>(
        &self,
        operation: &'static str,
        method: Method,
        segments: &[&str],
        build: F,
    ) -> Result<Value, ApiError>
    where
        F: FnOnce(RequestBuilder) -> Result<RequestBuilder, ApiError>,
    {
        let mut target = self.base_url.clone();
        let result = async {
            let url = self.endpoint(segments)?;
            target = url.to_string();
            tracing::debug!(
                operation = operation,
                method = %method,
                url = %url,
                "Sending API request"
            );
            let request = build(self.http.request(method.clone(), url))?;
            dispatch(request).await
        }
        .await;

        if let Err(e) = &result {
            tracing::error!(
                operation = operation,
                method = %method,
                url = %target,
                status_code = ?e.status_code(),
                error = %e,
                "API request failed"
            );
        }

        result
    }
}

/// Serialize a JSON body up front so encoding failures surface as `ApiError::Encode`
fn json_body<T>(req: RequestBuilder, payload: &T) -> Result<RequestBuilder, ApiError>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
    Ok(req.header(CONTENT_TYPE, "application/json").body(body))
}

async fn dispatch(request: RequestBuilder) -> Result<Value, ApiError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;

    // 204 and other empty successes
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(source) => Err(ApiError::Decode { source, body }),
    }
}
