/// API module for Markforge
///
/// Typed boundary to the document/AI backend. Every backend capability is
/// one method; responses are unwrapped from the `{ data: … }` envelope and
/// failures normalized into [`ApiError`]. No retries, no caching: failures
/// surface verbatim to the caller.
///
/// # Architecture
///
/// - `client` - raw HTTP operations and envelope parsing
/// - `store` - document CRUD with the tag comma-string codec
/// - `ai` - generation and edit workflows
mod ai;
mod client;
mod store;

pub use ai::{
    AI_PROVENANCE_TAG, AiAuthoring, GENERATED_DESCRIPTION_MAX, GENERATED_TITLE_MAX,
    generated_draft,
};
pub use client::ApiClient;
pub use store::{DocumentStore, join_tags, split_tags};

/// Failure taxonomy for every backend-facing operation.
///
/// `Validation` is raised locally before any request is made; the other
/// variants normalize what the backend or transport reported.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
