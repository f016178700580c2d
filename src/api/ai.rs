use super::client::ApiClient;
use super::{ApiError, ApiResult};
use crate::types::{DocumentDraft, GenerationOptions};

/// Fixed tag marking documents created from generated content.
pub const AI_PROVENANCE_TAG: &str = "ai-generated";

// The backend column widths are the real bound here; keep these named so a
// different deployment can adjust them in one place.
pub const GENERATED_TITLE_MAX: usize = 50;
pub const GENERATED_DESCRIPTION_MAX: usize = 200;

/// Generation and edit workflows over the [`ApiClient`].
///
/// Neither operation persists anything; saving a generated draft is a
/// separate, explicit create through the document store.
#[derive(Clone)]
pub struct AiAuthoring {
    client: ApiClient,
}

impl AiAuthoring {
    pub fn from_env() -> Self {
        Self::new(ApiClient::from_env())
    }

    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Turns a prompt into generated Markdown. Empty prompts fail locally
    /// before any request is made.
    pub async fn generate(&self, prompt: &str, options: GenerationOptions) -> ApiResult<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ApiError::Validation("prompt is required".to_string()));
        }
        let generated = self.client.generate(prompt, options.clamped()).await?;
        Ok(generated.content)
    }

    /// Produces replacement content for an in-progress edit session. Title,
    /// description and tags are untouched by design; the caller overwrites
    /// only the draft's content.
    pub async fn edit(
        &self,
        original_text: &str,
        instructions: &str,
        options: GenerationOptions,
    ) -> ApiResult<String> {
        let instructions = instructions.trim();
        if instructions.is_empty() {
            return Err(ApiError::Validation(
                "edit instructions are required".to_string(),
            ));
        }
        let edited = self
            .client
            .edit(original_text, instructions, options.clamped())
            .await?;
        Ok(edited.content)
    }
}

/// Builds the draft that persists a generation result: the prompt doubles as
/// title and description (truncated), and the provenance tag marks origin.
pub fn generated_draft(prompt: &str, content: &str) -> DocumentDraft {
    let prompt = prompt.trim();
    DocumentDraft {
        title: truncate_chars(prompt, GENERATED_TITLE_MAX),
        content: content.to_string(),
        description: truncate_chars(prompt, GENERATED_DESCRIPTION_MAX),
        tags: vec![AI_PROVENANCE_TAG.to_string()],
    }
}

/// Truncation by character count, never splitting a multi-byte sequence.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generate_rejects_blank_prompt_before_any_request() {
        let ai = AiAuthoring::new(ApiClient::new("http://127.0.0.1:1".to_string()));
        let err = ai
            .generate("  \n ", GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn edit_rejects_blank_instructions_before_any_request() {
        let ai = AiAuthoring::new(ApiClient::new("http://127.0.0.1:1".to_string()));
        let err = ai
            .edit("# Doc", "", GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn generated_draft_truncates_and_tags() {
        let prompt = "x".repeat(300);
        let draft = generated_draft(&prompt, "# Result");
        assert_eq!(draft.title.chars().count(), GENERATED_TITLE_MAX);
        assert_eq!(draft.description.chars().count(), GENERATED_DESCRIPTION_MAX);
        assert_eq!(draft.content, "# Result");
        assert_eq!(draft.tags, vec![AI_PROVENANCE_TAG.to_string()]);
    }

    #[test]
    fn generated_draft_keeps_short_prompts_whole() {
        let draft = generated_draft("write a plan", "content");
        assert_eq!(draft.title, "write a plan");
        assert_eq!(draft.description, "write a plan");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let prompt = "日本語のプロンプト".repeat(20);
        let draft = generated_draft(&prompt, "c");
        assert_eq!(draft.title.chars().count(), GENERATED_TITLE_MAX);
        // Slicing mid-codepoint would have panicked above; also confirm the
        // prefix survived intact.
        assert!(prompt.starts_with(&draft.title));
    }
}
