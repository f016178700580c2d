use crate::api::{ApiError, DocumentStore};
use crate::session::{Notice, Severity};
use crate::types::Document;
use crate::ui::Route;
use crate::views::shared::{format_doc_date, preview_text};
use dioxus::events::{FormEvent, Key, KeyboardEvent};
use dioxus::prelude::*;

const PREVIEW_CHARS: usize = 120;

#[component]
pub fn DocsListView(route: Signal<Route>) -> Element {
    let mut route = route;
    let store = use_context::<DocumentStore>();
    let mut docs = use_signal(Vec::<Document>::new);
    let mut query = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut pending_delete = use_signal(|| Option::<u64>::None);
    let mut refresh = use_signal(|| 0u32);

    {
        let store = store.clone();
        use_effect(move || {
            // Re-runs on every refresh bump; the query is read without
            // subscribing so typing alone does not trigger a fetch.
            let _tick = refresh();
            let q = query.peek().clone();
            let store = store.clone();
            loading.set(true);
            spawn(async move {
                match store.list(&q).await {
                    Ok(found) => docs.set(found),
                    Err(err) => {
                        tracing::error!("document list failed: {err}");
                        notice.set(Some(Notice {
                            message: format!("failed to load documents: {err}"),
                            severity: Severity::Error,
                        }));
                    }
                }
                loading.set(false);
            });
        });
    }

    let run_search = move || {
        if !loading() {
            refresh.set(refresh() + 1);
        }
    };

    let display_docs = docs();
    let confirm_id = pending_delete();

    rsx! {
        div { class: "main-container",
            div { class: "page-header",
                h1 { class: "page-title", "Documents" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| route.set(Route::Create),
                    "New Document"
                }
            }

            NoticeBanner { notice }

            div { class: "search-bar",
                input {
                    class: "search-input",
                    r#type: "search",
                    placeholder: "Search title, description or tags…",
                    value: "{query}",
                    oninput: move |evt: FormEvent| query.set(evt.value()),
                    onkeydown: {
                        let mut run_search = run_search;
                        move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter {
                                evt.prevent_default();
                                run_search();
                            }
                        }
                    },
                }
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: loading(),
                    onclick: {
                        let mut run_search = run_search;
                        move |_| run_search()
                    },
                    "Search"
                }
            }

            if loading() {
                p { class: "text-muted", "Loading documents…" }
            } else if display_docs.is_empty() {
                div { class: "doc-empty",
                    p { class: "text-muted", "No documents found. Create one or generate one with AI." }
                }
            } else {
                div { class: "doc-table",
                    div { class: "doc-table-header",
                        span { class: "doc-col-title", "Title" }
                        span { class: "doc-col-tags", "Tags" }
                        span { class: "doc-col-date", "Updated" }
                        span { class: "doc-col-actions", "" }
                    }
                    div { class: "doc-table-body",
                        for doc in display_docs.iter().cloned() {
                            div {
                                key: "{doc.id}",
                                class: "doc-row",
                                role: "button",
                                tabindex: "0",
                                onclick: {
                                    let doc_id = doc.id;
                                    move |_| route.set(Route::View(doc_id))
                                },
                                div { class: "doc-row-main",
                                    span { class: "doc-row-title", "{doc.title}" }
                                    if !doc.description.is_empty() {
                                        span { class: "doc-row-preview", "{preview_text(&doc.description, PREVIEW_CHARS)}" }
                                    }
                                }
                                div { class: "doc-row-tags",
                                    if doc.tags.is_empty() {
                                        span { class: "tag-pill tag-pill-muted", "No tags" }
                                    } else {
                                        for tag in doc.tags.iter() {
                                            span { class: "tag-pill tag-pill-compact", "{tag}" }
                                        }
                                    }
                                }
                                span { class: "doc-row-date", "{format_doc_date(&doc.updated_at)}" }
                                div { class: "doc-row-actions",
                                    if confirm_id == Some(doc.id) {
                                        button {
                                            class: "btn btn-danger btn-small",
                                            r#type: "button",
                                            onclick: {
                                                let doc_id = doc.id;
                                                let store = store.clone();
                                                move |evt: MouseEvent| {
                                                    evt.stop_propagation();
                                                    pending_delete.set(None);
                                                    let store = store.clone();
                                                    spawn(async move {
                                                        match store.delete(doc_id).await {
                                                            Ok(()) => {
                                                                notice.set(Some(Notice {
                                                                    message: "document deleted".to_string(),
                                                                    severity: Severity::Success,
                                                                }));
                                                                refresh.set(refresh() + 1);
                                                            }
                                                            Err(err) => {
                                                                // A vanished document is reported, not
                                                                // resynced; the user refreshes the list
                                                                // themselves.
                                                                let severity = match err {
                                                                    ApiError::NotFound(_) => Severity::Warning,
                                                                    _ => Severity::Error,
                                                                };
                                                                notice.set(Some(Notice {
                                                                    message: format!("delete failed: {err}"),
                                                                    severity,
                                                                }));
                                                            }
                                                        }
                                                    });
                                                }
                                            },
                                            "Confirm delete"
                                        }
                                        button {
                                            class: "btn btn-ghost btn-small",
                                            r#type: "button",
                                            onclick: move |evt: MouseEvent| {
                                                evt.stop_propagation();
                                                pending_delete.set(None);
                                            },
                                            "Cancel"
                                        }
                                    } else {
                                        button {
                                            class: "btn btn-ghost btn-small",
                                            r#type: "button",
                                            onclick: {
                                                let doc_id = doc.id;
                                                move |evt: MouseEvent| {
                                                    evt.stop_propagation();
                                                    route.set(Route::Edit(doc_id));
                                                }
                                            },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-ghost btn-small",
                                            r#type: "button",
                                            onclick: {
                                                let doc_id = doc.id;
                                                move |evt: MouseEvent| {
                                                    evt.stop_propagation();
                                                    pending_delete.set(Some(doc_id));
                                                }
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Dismissible transient status banner shared by the list-style views.
#[component]
pub fn NoticeBanner(notice: Signal<Option<Notice>>) -> Element {
    let mut notice = notice;
    rsx! {
        if let Some(current) = notice() {
            div { class: format_args!("notice {}", current.severity.css_class()),
                span { class: "notice-message", "{current.message}" }
                button {
                    class: "notice-dismiss btn-ghost",
                    r#type: "button",
                    aria_label: "Dismiss",
                    onclick: move |_| notice.set(None),
                    dangerous_inner_html: "&times;"
                }
            }
        }
    }
}
