use crate::api::{ApiError, DocumentStore};
use crate::session::{Notice, Severity};
use crate::types::Document;
use crate::ui::Route;
use crate::views::list::NoticeBanner;
use crate::views::shared::{format_doc_date, markdown_to_html};
use dioxus::prelude::*;

#[component]
pub fn ViewerView(route: Signal<Route>, doc_id: u64) -> Element {
    let mut route = route;
    let store = use_context::<DocumentStore>();
    let mut doc = use_signal(|| Option::<Document>::None);
    let mut loading = use_signal(|| true);
    let notice = use_signal(|| Option::<Notice>::None);
    let mut confirm_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    {
        let store = store.clone();
        let mut notice = notice;
        use_effect(move || {
            let store = store.clone();
            loading.set(true);
            spawn(async move {
                match store.get(doc_id).await {
                    Ok(found) => doc.set(Some(found)),
                    Err(err) => {
                        notice.set(Some(Notice {
                            message: format!("failed to load document: {err}"),
                            severity: Severity::Error,
                        }));
                    }
                }
                loading.set(false);
            });
        });
    }

    let on_delete = {
        let store = store.clone();
        let mut notice = notice;
        move |_| {
            if deleting() {
                return;
            }
            let store = store.clone();
            confirm_delete.set(false);
            deleting.set(true);
            spawn(async move {
                match store.delete(doc_id).await {
                    Ok(()) => route.set(Route::Documents),
                    Err(err) => {
                        let severity = match err {
                            ApiError::NotFound(_) => Severity::Warning,
                            _ => Severity::Error,
                        };
                        notice.set(Some(Notice {
                            message: format!("delete failed: {err}"),
                            severity,
                        }));
                        deleting.set(false);
                    }
                }
            });
        }
    };

    let current = doc();
    let title = current
        .as_ref()
        .map(|document| document.title.clone())
        .unwrap_or_else(|| "Document".to_string());

    rsx! {
        div { class: "main-container",
            div { class: "page-header",
                h1 { class: "page-title", "{title}" }
                div { class: "page-actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| route.set(Route::Documents),
                        "Back to list"
                    }
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| route.set(Route::Edit(doc_id)),
                        "Edit"
                    }
                    if confirm_delete() {
                        button {
                            class: "btn btn-danger",
                            r#type: "button",
                            disabled: deleting(),
                            onclick: on_delete,
                            "Confirm delete"
                        }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| confirm_delete.set(false),
                            "Cancel"
                        }
                    } else {
                        button {
                            class: "btn btn-danger",
                            r#type: "button",
                            disabled: deleting(),
                            onclick: move |_| confirm_delete.set(true),
                            "Delete"
                        }
                    }
                }
            }

            NoticeBanner { notice }

            if loading() {
                p { class: "text-muted", "Loading document…" }
            } else if let Some(document) = current {
                if !document.description.is_empty() {
                    p { class: "doc-description", "{document.description}" }
                }
                div { class: "doc-meta",
                    if !document.tags.is_empty() {
                        div { class: "doc-overlay-tags",
                            for tag in document.tags.iter() {
                                span { class: "tag-pill tag-pill-compact", "{tag}" }
                            }
                        }
                    }
                    span { class: "doc-row-date",
                        "Created {format_doc_date(&document.created_at)} · Updated {format_doc_date(&document.updated_at)}"
                    }
                }
                div { class: "md doc-viewer-content", dangerous_inner_html: "{markdown_to_html(&document.content)}" }
            } else {
                div { class: "doc-empty",
                    p { class: "text-muted", "This document could not be loaded. It may have been deleted." }
                }
            }
        }
    }
}
