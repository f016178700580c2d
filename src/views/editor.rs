use crate::api::{AiAuthoring, DocumentStore};
use crate::session::{EditorMode, EditorSession, SaveCompletion, SaveTarget, SessionPhase};
use crate::types::{AiModel, GenerationOptions};
use crate::ui::Route;
use crate::views::shared::markdown_to_html;
use dioxus::events::{FormEvent, Key};
use dioxus::prelude::*;

// Edits run with fixed knobs; only the generation page exposes them to
// the user.
const EDIT_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 3000,
    model: AiModel::Gpt35Turbo,
};

#[component]
pub fn EditorView(route: Signal<Route>, doc_id: Option<u64>) -> Element {
    let mut route = route;
    let store = use_context::<DocumentStore>();
    let ai = use_context::<AiAuthoring>();
    let session = use_signal(move || EditorSession::new(doc_id));

    // Fetch the persisted document once in edit mode. begin_load is a no-op
    // on re-runs and in create mode.
    {
        let store = store.clone();
        let mut session = session;
        use_effect(move || {
            let ticket = session.with_mut(|s| s.begin_load());
            if let Some(ticket) = ticket {
                let store = store.clone();
                spawn(async move {
                    let result = store.get(ticket.doc_id).await;
                    session.with_mut(|s| s.finish_load(ticket, result));
                });
            }
        });
    }

    // Anything still outstanding when this view unmounts resolves against a
    // dead epoch and is discarded.
    {
        let mut session = session;
        use_drop(move || session.with_mut(|s| s.unmount()));
    }

    let on_save = {
        let store = store.clone();
        let mut session = session;
        move |_| {
            let Some(ticket) = session.with_mut(|s| s.begin_save()) else {
                return;
            };
            let store = store.clone();
            spawn(async move {
                let result = match ticket.target {
                    SaveTarget::Create => store.create(&ticket.draft).await,
                    SaveTarget::Update(id) => store.update(id, &ticket.draft).await,
                };
                let completion = session.with_mut(|s| s.finish_save(&ticket, result));
                if let Some(SaveCompletion::Created(id)) = completion {
                    route.set(Route::View(id));
                }
            });
        }
    };

    let on_ai_apply = {
        let ai = ai.clone();
        let mut session = session;
        move |_| {
            let Some(ticket) = session.with_mut(|s| s.begin_ai_edit()) else {
                return;
            };
            let ai = ai.clone();
            spawn(async move {
                let result = ai
                    .edit(&ticket.original, &ticket.instructions, EDIT_OPTIONS)
                    .await;
                session.with_mut(|s| s.finish_ai_edit(&ticket, result));
            });
        }
    };

    let mut session = session;
    let is_edit_mode = session.with(|s| matches!(s.mode(), EditorMode::Edit(_)));
    let is_loading = session.with(|s| s.phase() == SessionPhase::Loading);
    let is_saving = session.with(|s| s.phase() == SessionPhase::Saving);
    let is_ai_editing = session.with(|s| s.is_ai_editing());
    let draft = session.with(|s| s.draft().clone());
    let tag_input = session.with(|s| s.tag_input().to_string());
    let load_error = session.with(|s| s.load_error().map(str::to_string));
    let notice = session.with(|s| s.notice().cloned());
    let dialog_open = session.with(|s| s.ai_dialog_open());
    let ai_instructions = session.with(|s| s.ai_instructions().to_string());
    let ai_error = session.with(|s| s.ai_error().map(str::to_string));
    let title_blank = draft.title.trim().is_empty();
    let preview_html = markdown_to_html(&draft.content);

    rsx! {
        div { class: "main-container",
            div { class: "page-header",
                h1 { class: "page-title",
                    if is_edit_mode { "Edit Document" } else { "Create Document" }
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        match doc_id {
                            Some(id) => route.set(Route::View(id)),
                            None => route.set(Route::Documents),
                        }
                    },
                    if is_edit_mode { "Back to document" } else { "Back to list" }
                }
            }

            if let Some(current) = notice {
                div { class: format_args!("notice {}", current.severity.css_class()),
                    span { class: "notice-message", "{current.message}" }
                    button {
                        class: "notice-dismiss btn-ghost",
                        r#type: "button",
                        aria_label: "Dismiss",
                        onclick: move |_| session.with_mut(|s| s.dismiss_notice()),
                        dangerous_inner_html: "&times;"
                    }
                }
            }

            if is_loading {
                p { class: "text-muted", "Loading document…" }
            } else {
                if let Some(message) = load_error {
                    div { class: "notice notice-error", span { class: "notice-message", "{message}" } }
                }

                div { class: "panel",
                    h2 { class: "panel-title", "Details" }
                    div { class: "form-field",
                        label { class: "control-label", r#for: "doc-title", "Title" }
                        input {
                            id: "doc-title",
                            class: if title_blank { "input input-invalid" } else { "input" },
                            value: "{draft.title}",
                            oninput: move |evt: FormEvent| session.with_mut(|s| s.set_title(evt.value())),
                        }
                        if title_blank {
                            span { class: "field-error", "Title is required" }
                        }
                    }
                    div { class: "form-field",
                        label { class: "control-label", r#for: "doc-description", "Description" }
                        textarea {
                            id: "doc-description",
                            class: "input",
                            rows: "2",
                            value: "{draft.description}",
                            oninput: move |evt: FormEvent| session.with_mut(|s| s.set_description(evt.value())),
                        }
                    }
                    div { class: "form-field",
                        span { class: "control-label", "Tags" }
                        div { class: "tag-editor",
                            for tag in draft.tags.iter().cloned() {
                                span { class: "tag-pill",
                                    "{tag}"
                                    button {
                                        class: "tag-remove",
                                        r#type: "button",
                                        aria_label: "Remove tag {tag}",
                                        onclick: {
                                            let tag = tag.clone();
                                            move |_| session.with_mut(|s| s.remove_tag(&tag))
                                        },
                                        dangerous_inner_html: "&times;"
                                    }
                                }
                            }
                            input {
                                class: "input tag-input",
                                placeholder: "Add tag",
                                value: "{tag_input}",
                                oninput: move |evt: FormEvent| session.with_mut(|s| s.set_tag_input(evt.value())),
                                onkeydown: move |evt| {
                                    if evt.key() == Key::Enter {
                                        evt.prevent_default();
                                        session.with_mut(|s| s.add_tag());
                                    }
                                },
                            }
                            button {
                                class: "btn btn-small",
                                r#type: "button",
                                disabled: tag_input.trim().is_empty(),
                                onclick: move |_| session.with_mut(|s| s.add_tag()),
                                "Add"
                            }
                        }
                    }
                }

                div { class: "editor-grid",
                    div { class: "panel",
                        div { class: "panel-header",
                            h2 { class: "panel-title", "Content" }
                            button {
                                class: "btn",
                                r#type: "button",
                                disabled: is_saving,
                                onclick: move |_| session.with_mut(|s| s.open_ai_dialog()),
                                "AI Assist"
                            }
                        }
                        textarea {
                            class: "input content-editor",
                            rows: "20",
                            placeholder: "Write Markdown here…",
                            value: "{draft.content}",
                            oninput: move |evt: FormEvent| session.with_mut(|s| s.set_content(evt.value())),
                        }
                        button {
                            class: "btn btn-primary btn-block",
                            r#type: "button",
                            disabled: is_saving,
                            onclick: on_save,
                            if is_saving { "Saving…" } else { "Save Document" }
                        }
                    }
                    div { class: "panel",
                        h2 { class: "panel-title", "Preview" }
                        div { class: "md doc-preview", dangerous_inner_html: "{preview_html}" }
                    }
                }

                if dialog_open {
                    div { class: "doc-overlay", role: "dialog", aria_modal: "true",
                        onclick: move |_| session.with_mut(|s| s.close_ai_dialog()),
                        div {
                            class: "doc-overlay-panel",
                            onclick: move |evt| evt.stop_propagation(),
                            header { class: "doc-overlay-header",
                                h2 { class: "panel-title", "AI Assisted Edit" }
                            }
                            p { class: "text-muted",
                                "Describe the change and the assistant rewrites the content. The result replaces the editor text; nothing is saved until you save the document."
                            }
                            textarea {
                                class: "input",
                                rows: "4",
                                placeholder: "e.g. add a background section, or restructure for clarity…",
                                value: "{ai_instructions}",
                                disabled: is_ai_editing,
                                oninput: move |evt: FormEvent| {
                                    session.with_mut(|s| s.set_ai_instructions(evt.value()))
                                },
                            }
                            if let Some(message) = ai_error {
                                span { class: "field-error", "{message}" }
                            }
                            div { class: "dialog-actions",
                                button {
                                    class: "btn btn-ghost",
                                    r#type: "button",
                                    disabled: is_ai_editing,
                                    onclick: move |_| session.with_mut(|s| s.close_ai_dialog()),
                                    "Cancel"
                                }
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    disabled: is_ai_editing || ai_instructions.trim().is_empty(),
                                    onclick: on_ai_apply,
                                    if is_ai_editing { "Applying…" } else { "Apply Edit" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
