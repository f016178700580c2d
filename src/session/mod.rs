/// Editor session module for Markforge
///
/// The session is a pure state machine: the UI calls `begin_*` methods,
/// which hand back a ticket when (and only when) the transition is legal,
/// performs the network call itself, and feeds the result to the matching
/// `finish_*` method. Tickets carry an epoch token so results that resolve
/// after the session moved on or unmounted are discarded instead of
/// mutating stale state.
mod editor;

pub use editor::{
    AiEditTicket, EditorMode, EditorSession, LoadTicket, SaveCompletion, SaveTarget, SaveTicket,
    SessionPhase,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "notice-info",
            Severity::Success => "notice-success",
            Severity::Warning => "notice-warning",
            Severity::Error => "notice-error",
        }
    }
}

/// One transient status message, owned by a single session.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

/// FIFO of pending notices; the presentation layer peeks the front and
/// dismisses consumed entries. Never shared across sessions.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    entries: std::collections::VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.entries.push_back(Notice {
            message: message.into(),
            severity,
        });
    }

    pub fn peek(&self) -> Option<&Notice> {
        self.entries.front()
    }

    pub fn dismiss(&mut self) -> Option<Notice> {
        self.entries.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
