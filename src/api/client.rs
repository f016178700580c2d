use super::{ApiError, ApiResult};
use crate::types::GenerationOptions;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

// The backend does not define timeouts; without one a hang surfaces only as
// an indefinite in-progress state in the UI.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One HTTP method per backend capability. Stateless beyond the connection
/// pool; all normalization of errors happens here.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Wire shape of a document. `tags` stays a single comma-joined string at
/// this layer; the store boundary converts it.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentWire {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "tags_as_string")]
    pub tags: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// The backend serializes `tags` either as the stored comma string or as an
/// already-split list, depending on the endpoint. Accept both.
fn tags_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Joined(String),
        Split(Vec<String>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Joined(s) => s,
        Raw::Split(parts) => parts.join(","),
    })
}

#[derive(serde::Serialize)]
pub struct DocumentPayload<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub description: &'a str,
    /// Comma-joined at the store boundary.
    pub tags: String,
}

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    options: GenerationOptions,
}

#[derive(serde::Serialize)]
struct EditRequest<'a> {
    original_text: &'a str,
    instructions: &'a str,
    options: GenerationOptions,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedContent {
    pub content: String,
}

impl ApiClient {
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("MARKFORGE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!("falling back to default http client: {err}");
                Client::new()
            });
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_documents(&self, query: &str) -> ApiResult<Vec<DocumentWire>> {
        let mut request = self.client.get(self.url("/api/markdown/documents"));
        if !query.is_empty() {
            request = request.query(&[("q", query)]);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }

    pub async fn get_document(&self, id: u64) -> ApiResult<DocumentWire> {
        let response = self
            .client
            .get(self.url(&format!("/api/markdown/documents/{id}")))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }

    pub async fn create_document(&self, payload: &DocumentPayload<'_>) -> ApiResult<DocumentWire> {
        let response = self
            .client
            .post(self.url("/api/markdown/documents"))
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }

    pub async fn update_document(
        &self,
        id: u64,
        payload: &DocumentPayload<'_>,
    ) -> ApiResult<DocumentWire> {
        let response = self
            .client
            .put(self.url(&format!("/api/markdown/documents/{id}")))
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }

    pub async fn delete_document(&self, id: u64) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/markdown/documents/{id}")))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        parse_empty(status, &body)
    }

    pub async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> ApiResult<GeneratedContent> {
        let response = self
            .client
            .post(self.url("/api/markdown/generate"))
            .json(&GenerateRequest { prompt, options })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }

    pub async fn edit(
        &self,
        original_text: &str,
        instructions: &str,
        options: GenerationOptions,
    ) -> ApiResult<GeneratedContent> {
        let response = self
            .client
            .post(self.url("/api/markdown/edit"))
            .json(&EditRequest {
                original_text,
                instructions,
                options,
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }
}

/// Unwraps a `{ data: … }` success envelope or normalizes the failure.
fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> ApiResult<T> {
    if status.is_success() {
        serde_json::from_str::<Envelope<T>>(body)
            .map(|envelope| envelope.data)
            .map_err(|err| ApiError::Transport(format!("malformed response: {err}")))
    } else {
        Err(error_from(status, body))
    }
}

fn parse_empty(status: StatusCode, body: &str) -> ApiResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(error_from(status, body))
    }
}

fn error_from(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| format!("request failed ({})", status.as_u16()));

    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound(message)
    } else {
        ApiError::Backend(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_success_envelope() {
        let body = r##"{"status":"success","data":{"content":"# Hello"}}"##;
        let parsed: GeneratedContent = parse_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(parsed.content, "# Hello");
    }

    #[test]
    fn surfaces_backend_message() {
        let body = r#"{"status":"error","message":"generation failed"}"#;
        let err = parse_envelope::<GeneratedContent>(StatusCode::INTERNAL_SERVER_ERROR, body)
            .unwrap_err();
        assert!(matches!(err, ApiError::Backend(msg) if msg == "generation failed"));
    }

    #[test]
    fn missing_message_falls_back_to_status() {
        let err = parse_envelope::<GeneratedContent>(StatusCode::BAD_GATEWAY, "").unwrap_err();
        assert!(matches!(err, ApiError::Backend(msg) if msg == "request failed (502)"));
    }

    #[test]
    fn not_found_is_its_own_variant() {
        let body = r#"{"message":"no such document"}"#;
        let err = parse_envelope::<DocumentWire>(StatusCode::NOT_FOUND, body).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(msg) if msg == "no such document"));
    }

    #[test]
    fn malformed_success_body_is_transport_error() {
        let err = parse_envelope::<GeneratedContent>(StatusCode::OK, "<!doctype html>").unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn document_wire_accepts_joined_and_split_tags() {
        let joined: DocumentWire = serde_json::from_str(
            r#"{"id":1,"title":"T","tags":"a,b","created_at":"","updated_at":""}"#,
        )
        .unwrap();
        assert_eq!(joined.tags, "a,b");

        let split: DocumentWire = serde_json::from_str(
            r#"{"id":2,"title":"T","tags":["a","b"],"created_at":"","updated_at":""}"#,
        )
        .unwrap();
        assert_eq!(split.tags, "a,b");
    }

    #[test]
    fn delete_success_ignores_body() {
        assert!(parse_empty(StatusCode::OK, "{}").is_ok());
        assert!(matches!(
            parse_empty(StatusCode::NOT_FOUND, r#"{"message":"gone"}"#),
            Err(ApiError::NotFound(_))
        ));
    }
}
