use super::client::{ApiClient, DocumentPayload, DocumentWire};
use super::{ApiError, ApiResult};
use crate::types::{Document, DocumentDraft};

/// Document CRUD over the [`ApiClient`].
///
/// This is the only layer that sees the wire representation: the comma-joined
/// tag string is split on load and joined on save, and empty segments are
/// dropped so business logic always holds a clean tag list.
#[derive(Clone)]
pub struct DocumentStore {
    client: ApiClient,
}

impl DocumentStore {
    pub fn from_env() -> Self {
        Self::new(ApiClient::from_env())
    }

    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// All documents, or the backend-filtered subset when `query` is
    /// non-empty. An empty result is a valid outcome, not an error.
    pub async fn list(&self, query: &str) -> ApiResult<Vec<Document>> {
        let wires = self.client.list_documents(query.trim()).await?;
        Ok(wires.into_iter().map(document_from_wire).collect())
    }

    pub async fn get(&self, id: u64) -> ApiResult<Document> {
        let wire = self.client.get_document(id).await?;
        Ok(document_from_wire(wire))
    }

    /// Persists a new draft. Fails locally with `Validation` before any
    /// request when the title is blank; a document is never persisted
    /// without one.
    pub async fn create(&self, draft: &DocumentDraft) -> ApiResult<Document> {
        validate_title(draft)?;
        let wire = self.client.create_document(&payload_from_draft(draft)).await?;
        Ok(document_from_wire(wire))
    }

    /// Replaces the addressed document's mutable fields.
    pub async fn update(&self, id: u64, draft: &DocumentDraft) -> ApiResult<Document> {
        validate_title(draft)?;
        let wire = self
            .client
            .update_document(id, &payload_from_draft(draft))
            .await?;
        Ok(document_from_wire(wire))
    }

    /// Irreversible; callers confirm with the user first. Deleting a missing
    /// id fails with `NotFound` rather than succeeding idempotently.
    pub async fn delete(&self, id: u64) -> ApiResult<()> {
        self.client.delete_document(id).await
    }
}

fn validate_title(draft: &DocumentDraft) -> ApiResult<()> {
    if draft.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    Ok(())
}

fn document_from_wire(wire: DocumentWire) -> Document {
    Document {
        id: wire.id,
        title: wire.title,
        content: wire.content.unwrap_or_default(),
        description: wire.description.unwrap_or_default(),
        tags: split_tags(&wire.tags),
        created_at: wire.created_at,
        updated_at: wire.updated_at,
    }
}

fn payload_from_draft(draft: &DocumentDraft) -> DocumentPayload<'_> {
    DocumentPayload {
        title: &draft.title,
        content: &draft.content,
        description: &draft.description,
        tags: join_tags(&draft.tags),
    }
}

/// Splits the persisted comma-joined form, discarding empty and
/// whitespace-only segments. Order is preserved for display.
pub fn split_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_preserving_order() {
        let tags = vec!["a".to_string(), "b".to_string()];
        let joined = join_tags(&tags);
        assert_eq!(joined, "a,b");
        assert_eq!(split_tags(&joined), tags);
    }

    #[test]
    fn split_drops_empty_segments() {
        assert_eq!(split_tags("a,,b,"), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(split_tags(" , ,"), Vec::<String>::new());
        assert_eq!(split_tags(""), Vec::<String>::new());
    }

    #[test]
    fn split_trims_segment_whitespace() {
        assert_eq!(
            split_tags(" rust , notes "),
            vec!["rust".to_string(), "notes".to_string()]
        );
    }

    #[tokio::test]
    async fn create_rejects_blank_title_before_any_request() {
        // Unroutable base URL: if validation let the call through, the error
        // would be Transport, not Validation.
        let store = DocumentStore::new(ApiClient::new("http://127.0.0.1:1".to_string()));
        let draft = DocumentDraft {
            title: "   ".to_string(),
            content: "body".to_string(),
            ..DocumentDraft::default()
        };
        let err = store.create(&draft).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = store.update(7, &draft).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
