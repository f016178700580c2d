use super::{Notice, NoticeQueue, Severity};
use crate::api::ApiResult;
use crate::types::{Document, DocumentDraft};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Edit mode before the fetch has been issued.
    Idle,
    Loading,
    Ready,
    Saving,
    AiEditing,
    Unmounted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(u64),
}

/// Handed out by `begin_load`; echoes back through `finish_load`.
#[derive(Clone, Copy, Debug)]
pub struct LoadTicket {
    pub doc_id: u64,
    pub token: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(u64),
}

#[derive(Clone, Debug)]
pub struct SaveTicket {
    pub token: u64,
    pub target: SaveTarget,
    pub draft: DocumentDraft,
}

#[derive(Clone, Debug)]
pub struct AiEditTicket {
    pub token: u64,
    pub original: String,
    pub instructions: String,
}

/// What a completed save means for navigation: a created document has a
/// fresh id the caller routes to; an update stays on the same draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveCompletion {
    Created(u64),
    Updated,
}

/// One editor instance's lifetime, mount to unmount.
///
/// Owns the draft, the tag input, the AI dialog sub-state and the notice
/// queue exclusively; nothing here is shared across sessions. All network
/// traffic stays outside: legal transitions yield tickets, results come
/// back through `finish_*`.
pub struct EditorSession {
    mode: EditorMode,
    phase: SessionPhase,
    draft: DocumentDraft,
    tag_input: String,
    load_error: Option<String>,
    ai_dialog_open: bool,
    ai_instructions: String,
    ai_error: Option<String>,
    /// Bumped on unmount; outstanding tickets carry the old value and their
    /// results are dropped on arrival.
    epoch: u64,
    notices: NoticeQueue,
}

impl EditorSession {
    /// `doc_id` selects edit mode; `None` starts a blank create-mode draft
    /// that is immediately `Ready`.
    pub fn new(doc_id: Option<u64>) -> Self {
        let (mode, phase) = match doc_id {
            Some(id) => (EditorMode::Edit(id), SessionPhase::Idle),
            None => (EditorMode::Create, SessionPhase::Ready),
        };
        Self {
            mode,
            phase,
            draft: DocumentDraft::default(),
            tag_input: String::new(),
            load_error: None,
            ai_dialog_open: false,
            ai_instructions: String::new(),
            ai_error: None,
            epoch: 0,
            notices: NoticeQueue::default(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn draft(&self) -> &DocumentDraft {
        &self.draft
    }

    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Loading | SessionPhase::Saving | SessionPhase::AiEditing
        )
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Issues the fetch for an existing document. Only legal once, from
    /// `Idle` in edit mode.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let EditorMode::Edit(doc_id) = self.mode else {
            return None;
        };
        if self.phase != SessionPhase::Idle {
            return None;
        }
        self.phase = SessionPhase::Loading;
        Some(LoadTicket {
            doc_id,
            token: self.epoch,
        })
    }

    /// On success the draft is populated from the persisted document. On
    /// failure the form stays usable with an error flag so the user can
    /// navigate and retry.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: ApiResult<Document>) {
        if !self.accepts(ticket.token, SessionPhase::Loading) {
            tracing::warn!(doc_id = ticket.doc_id, "discarding stale load result");
            return;
        }
        match result {
            Ok(doc) => {
                self.draft = DocumentDraft::from_document(&doc);
                self.load_error = None;
            }
            Err(err) => {
                self.load_error = Some(err.to_string());
                self.notices
                    .push(Severity::Error, format!("failed to load document: {err}"));
            }
        }
        self.phase = SessionPhase::Ready;
    }

    // ------------------------------------------------------------------
    // Local edits
    // ------------------------------------------------------------------

    pub fn set_title(&mut self, title: String) {
        self.draft.title = title;
    }

    pub fn set_content(&mut self, content: String) {
        self.draft.content = content;
    }

    pub fn set_description(&mut self, description: String) {
        self.draft.description = description;
    }

    pub fn set_tag_input(&mut self, input: String) {
        self.tag_input = input;
    }

    /// Trims the pending input and appends it to the tag set. Empty and
    /// duplicate (case-sensitive) tags are no-ops; the input field is
    /// cleared only when a tag was actually added.
    pub fn add_tag(&mut self) {
        let tag = self.tag_input.trim();
        if tag.is_empty() || self.draft.tags.iter().any(|existing| existing == tag) {
            return;
        }
        self.draft.tags.push(tag.to_string());
        self.tag_input.clear();
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.draft.tags.retain(|existing| existing != tag);
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Guarded entry into `Saving`: a no-op unless the session is `Ready`,
    /// so a second save can never start while one is in flight. Blank
    /// titles are reported and never reach the network.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        if self.phase != SessionPhase::Ready {
            return None;
        }
        if self.draft.title.trim().is_empty() {
            self.notices
                .push(Severity::Error, "please enter a document title");
            return None;
        }
        self.phase = SessionPhase::Saving;
        let target = match self.mode {
            EditorMode::Create => SaveTarget::Create,
            EditorMode::Edit(id) => SaveTarget::Update(id),
        };
        Some(SaveTicket {
            token: self.epoch,
            target,
            draft: self.draft.clone(),
        })
    }

    /// A created document flips the session into edit mode for its new id
    /// and reports `Created` so the caller can navigate deterministically.
    pub fn finish_save(
        &mut self,
        ticket: &SaveTicket,
        result: ApiResult<Document>,
    ) -> Option<SaveCompletion> {
        if !self.accepts(ticket.token, SessionPhase::Saving) {
            tracing::warn!("discarding stale save result");
            return None;
        }
        self.phase = SessionPhase::Ready;
        match result {
            Ok(doc) => {
                let completion = match ticket.target {
                    SaveTarget::Create => {
                        self.mode = EditorMode::Edit(doc.id);
                        self.notices.push(Severity::Success, "document created");
                        SaveCompletion::Created(doc.id)
                    }
                    SaveTarget::Update(_) => {
                        self.notices.push(Severity::Success, "document updated");
                        SaveCompletion::Updated
                    }
                };
                // Refresh from the persisted copy; the backend may have
                // normalized fields the client sent.
                let content = std::mem::take(&mut self.draft.content);
                self.draft = DocumentDraft::from_document(&doc);
                if self.draft.content.is_empty() && !content.is_empty() {
                    self.draft.content = content;
                }
                Some(completion)
            }
            Err(err) => {
                self.notices
                    .push(Severity::Error, format!("save failed: {err}"));
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // AI edit dialog
    // ------------------------------------------------------------------

    pub fn ai_dialog_open(&self) -> bool {
        self.ai_dialog_open
    }

    pub fn ai_instructions(&self) -> &str {
        &self.ai_instructions
    }

    pub fn ai_error(&self) -> Option<&str> {
        self.ai_error.as_deref()
    }

    pub fn is_ai_editing(&self) -> bool {
        self.phase == SessionPhase::AiEditing
    }

    /// Opening the dialog never blocks the outer form.
    pub fn open_ai_dialog(&mut self) {
        if self.phase == SessionPhase::Ready {
            self.ai_dialog_open = true;
        }
    }

    /// Close is refused while an AI edit is in flight.
    pub fn close_ai_dialog(&mut self) {
        if self.phase == SessionPhase::AiEditing {
            return;
        }
        self.ai_dialog_open = false;
        self.ai_instructions.clear();
        self.ai_error = None;
    }

    pub fn set_ai_instructions(&mut self, instructions: String) {
        self.ai_instructions = instructions;
    }

    /// Empty instructions are reported inline in the dialog and never call
    /// the backend.
    pub fn begin_ai_edit(&mut self) -> Option<AiEditTicket> {
        if self.phase != SessionPhase::Ready || !self.ai_dialog_open {
            return None;
        }
        let instructions = self.ai_instructions.trim().to_string();
        if instructions.is_empty() {
            self.ai_error = Some("please enter edit instructions".to_string());
            return None;
        }
        self.ai_error = None;
        self.phase = SessionPhase::AiEditing;
        Some(AiEditTicket {
            token: self.epoch,
            original: self.draft.content.clone(),
            instructions,
        })
    }

    /// Success replaces the draft's content only and closes the dialog;
    /// failure keeps it open with the error so the user can retry or
    /// cancel. The persisted copy is untouched either way.
    pub fn finish_ai_edit(&mut self, ticket: &AiEditTicket, result: ApiResult<String>) {
        if !self.accepts(ticket.token, SessionPhase::AiEditing) {
            tracing::warn!("discarding stale AI edit result");
            return;
        }
        self.phase = SessionPhase::Ready;
        match result {
            Ok(content) => {
                self.draft.content = content;
                self.ai_dialog_open = false;
                self.ai_instructions.clear();
                self.ai_error = None;
                self.notices.push(Severity::Success, "AI edit applied");
            }
            Err(err) => {
                self.ai_error = Some(err.to_string());
            }
        }
    }

    // ------------------------------------------------------------------
    // Notices & lifecycle
    // ------------------------------------------------------------------

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.peek()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.dismiss();
    }

    /// Discards all in-flight local state. Any outstanding network result
    /// carries an old epoch token and is ignored when it resolves.
    pub fn unmount(&mut self) {
        self.phase = SessionPhase::Unmounted;
        self.epoch += 1;
    }

    fn accepts(&self, token: u64, expected_phase: SessionPhase) -> bool {
        token == self.epoch && self.phase == expected_phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn sample_document(id: u64) -> Document {
        Document {
            id,
            title: "T".to_string(),
            content: "C".to_string(),
            description: String::new(),
            tags: vec!["x".to_string()],
            created_at: "2024-05-01T10:00:00".to_string(),
            updated_at: "2024-05-01T10:00:00".to_string(),
        }
    }

    fn ready_session_with_title(title: &str) -> EditorSession {
        let mut session = EditorSession::new(None);
        session.set_title(title.to_string());
        session
    }

    #[test]
    fn create_mode_starts_ready_with_blank_draft() {
        let mut session = EditorSession::new(None);
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.draft(), &DocumentDraft::default());
        assert!(session.begin_load().is_none());
    }

    #[test]
    fn edit_mode_loads_then_becomes_ready() {
        let mut session = EditorSession::new(Some(3));
        assert_eq!(session.phase(), SessionPhase::Idle);

        let ticket = session.begin_load().expect("load ticket");
        assert_eq!(ticket.doc_id, 3);
        assert_eq!(session.phase(), SessionPhase::Loading);
        // A second begin_load while one is in flight is a no-op.
        assert!(session.begin_load().is_none());

        session.finish_load(ticket, Ok(sample_document(3)));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.draft().title, "T");
        assert_eq!(session.draft().tags, vec!["x".to_string()]);
        assert!(session.load_error().is_none());
    }

    #[test]
    fn load_failure_keeps_form_usable_with_error_flag() {
        let mut session = EditorSession::new(Some(9));
        let ticket = session.begin_load().unwrap();
        session.finish_load(ticket, Err(ApiError::NotFound("gone".to_string())));

        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.load_error(), Some("gone"));
        assert_eq!(session.notice().map(|n| n.severity), Some(Severity::Error));
    }

    #[test]
    fn tag_add_trims_dedupes_and_clears_input() {
        let mut session = EditorSession::new(None);

        session.set_tag_input("  rust  ".to_string());
        session.add_tag();
        assert_eq!(session.draft().tags, vec!["rust".to_string()]);
        assert_eq!(session.tag_input(), "");

        // Same-case duplicate: no-op, including the input field.
        session.set_tag_input("rust".to_string());
        session.add_tag();
        assert_eq!(session.draft().tags, vec!["rust".to_string()]);
        assert_eq!(session.tag_input(), "rust");

        // Membership is case-sensitive.
        session.set_tag_input("Rust".to_string());
        session.add_tag();
        assert_eq!(
            session.draft().tags,
            vec!["rust".to_string(), "Rust".to_string()]
        );

        // Whitespace-only input: no-op.
        session.set_tag_input("   ".to_string());
        session.add_tag();
        assert_eq!(session.draft().tags.len(), 2);
    }

    #[test]
    fn remove_tag_removes_by_exact_name() {
        let mut session = EditorSession::new(None);
        session.set_tag_input("a".to_string());
        session.add_tag();
        session.set_tag_input("b".to_string());
        session.add_tag();

        session.remove_tag("a");
        assert_eq!(session.draft().tags, vec!["b".to_string()]);
        session.remove_tag("missing");
        assert_eq!(session.draft().tags, vec!["b".to_string()]);
    }

    #[test]
    fn save_with_blank_title_reports_and_yields_no_ticket() {
        let mut session = ready_session_with_title("   ");
        assert!(session.begin_save().is_none());
        assert_eq!(session.phase(), SessionPhase::Ready);
        let notice = session.notice().expect("validation notice");
        assert_eq!(notice.severity, Severity::Error);
    }

    #[test]
    fn at_most_one_save_in_flight() {
        let mut session = ready_session_with_title("T");
        let first = session.begin_save().expect("first save ticket");
        assert_eq!(session.phase(), SessionPhase::Saving);
        assert!(session.begin_save().is_none());

        let completion = session.finish_save(&first, Ok(sample_document(1)));
        assert_eq!(completion, Some(SaveCompletion::Created(1)));
        assert_eq!(session.phase(), SessionPhase::Ready);
        // Create mode became edit mode for the new id.
        assert_eq!(session.mode(), EditorMode::Edit(1));
        let second = session.begin_save().expect("saving again is legal");
        assert_eq!(second.target, SaveTarget::Update(1));
    }

    #[test]
    fn save_failure_keeps_draft_for_retry() {
        let mut session = ready_session_with_title("T");
        session.set_content("body".to_string());
        let ticket = session.begin_save().unwrap();
        let completion =
            session.finish_save(&ticket, Err(ApiError::Backend("boom".to_string())));
        assert!(completion.is_none());
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.draft().title, "T");
        assert_eq!(session.draft().content, "body");
        assert_eq!(session.mode(), EditorMode::Create);
    }

    #[test]
    fn update_save_refreshes_draft_in_place() {
        let mut session = EditorSession::new(Some(5));
        let load = session.begin_load().unwrap();
        session.finish_load(load, Ok(sample_document(5)));

        session.set_content("locally edited".to_string());
        let ticket = session.begin_save().unwrap();

        // List-shaped responses omit content; the local edit must survive.
        let mut persisted = sample_document(5);
        persisted.content = String::new();
        let completion = session.finish_save(&ticket, Ok(persisted));
        assert_eq!(completion, Some(SaveCompletion::Updated));
        assert_eq!(session.draft().content, "locally edited");
        assert_eq!(session.mode(), EditorMode::Edit(5));
    }

    #[test]
    fn ai_edit_requires_instructions() {
        let mut session = ready_session_with_title("T");
        session.open_ai_dialog();
        session.set_ai_instructions("  ".to_string());
        assert!(session.begin_ai_edit().is_none());
        assert!(session.ai_error().is_some());
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn ai_edit_replaces_content_only_and_closes_dialog() {
        let mut session = ready_session_with_title("Keep me");
        session.set_content("old".to_string());
        session.set_tag_input("keep".to_string());
        session.add_tag();

        session.open_ai_dialog();
        session.set_ai_instructions("tighten the intro".to_string());
        let ticket = session.begin_ai_edit().expect("ai ticket");
        assert_eq!(ticket.original, "old");
        assert!(session.is_ai_editing());
        // Close is blocked while the edit is in flight.
        session.close_ai_dialog();
        assert!(session.ai_dialog_open());

        session.finish_ai_edit(&ticket, Ok("new content".to_string()));
        assert_eq!(session.draft().content, "new content");
        assert_eq!(session.draft().title, "Keep me");
        assert_eq!(session.draft().tags, vec!["keep".to_string()]);
        assert!(!session.ai_dialog_open());
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn ai_edit_failure_keeps_dialog_open_for_retry() {
        let mut session = ready_session_with_title("T");
        session.set_content("original".to_string());
        session.open_ai_dialog();
        session.set_ai_instructions("do a thing".to_string());
        let ticket = session.begin_ai_edit().unwrap();

        session.finish_ai_edit(&ticket, Err(ApiError::Backend("model offline".to_string())));
        assert!(session.ai_dialog_open());
        assert_eq!(session.ai_error(), Some("model offline"));
        assert_eq!(session.draft().content, "original");

        // Retry with the same instructions is now possible…
        let retry = session.begin_ai_edit().expect("retry ticket");
        session.finish_ai_edit(&retry, Ok("fixed".to_string()));
        assert_eq!(session.draft().content, "fixed");

        // …and cancel works once nothing is in flight.
        session.open_ai_dialog();
        session.close_ai_dialog();
        assert!(!session.ai_dialog_open());
    }

    #[test]
    fn results_after_unmount_are_discarded() {
        let mut session = ready_session_with_title("T");
        let ticket = session.begin_save().unwrap();
        session.unmount();

        let completion = session.finish_save(&ticket, Ok(sample_document(2)));
        assert!(completion.is_none());
        assert_eq!(session.phase(), SessionPhase::Unmounted);
        assert_eq!(session.mode(), EditorMode::Create);
    }

    #[test]
    fn stale_load_after_unmount_is_discarded() {
        let mut session = EditorSession::new(Some(4));
        let ticket = session.begin_load().unwrap();
        session.unmount();
        session.finish_load(ticket, Ok(sample_document(4)));
        assert_eq!(session.draft(), &DocumentDraft::default());
    }

    #[test]
    fn mismatched_ticket_token_is_ignored() {
        let mut session = ready_session_with_title("T");
        let mut ticket = session.begin_save().unwrap();
        ticket.token += 1;
        assert!(session.finish_save(&ticket, Ok(sample_document(8))).is_none());
        // Still saving: the genuine result has not arrived yet.
        assert_eq!(session.phase(), SessionPhase::Saving);
    }

    #[test]
    fn notices_drain_in_order() {
        let mut session = ready_session_with_title(" ");
        session.begin_save();
        session.set_title("T".to_string());
        let ticket = session.begin_save().unwrap();
        session.finish_save(&ticket, Ok(sample_document(1)));

        assert_eq!(session.notice().map(|n| n.severity), Some(Severity::Error));
        session.dismiss_notice();
        assert_eq!(
            session.notice().map(|n| n.severity),
            Some(Severity::Success)
        );
        session.dismiss_notice();
        assert!(session.notice().is_none());
    }
}
