use crate::api::{AiAuthoring, ApiClient, DocumentStore};
use crate::theme::theme_definition;
use crate::types::ThemeMode;
use crate::views::{DocsListView, EditorView, GenerateView, ViewerView};
use dioxus::prelude::*;

const MOSTRA_CSS: Asset = asset!("/assets/mostra.css");

/// Navigation targets. Set by the views themselves; save completion in
/// create mode routes to `View(new_id)` explicitly instead of a timed
/// redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Documents,
    Generate,
    Create,
    View(u64),
    Edit(u64),
}

#[component]
pub fn App() -> Element {
    let client = ApiClient::from_env();
    use_context_provider(|| DocumentStore::new(client.clone()));
    use_context_provider(move || AiAuthoring::new(client.clone()));

    let route = use_signal(|| Route::Documents);
    let theme = use_signal(|| ThemeMode::Dark);

    rsx! {
        ThemeStyles { theme }
        AppHeader { route, theme }
        div { class: "route-panel",
            {match route() {
                Route::Documents => rsx!( DocsListView { route } ),
                Route::Generate => rsx!( GenerateView { route } ),
                Route::Create => rsx!( EditorView { route, doc_id: None::<u64> } ),
                Route::View(id) => rsx!( ViewerView { route, doc_id: id } ),
                Route::Edit(id) => rsx!( EditorView { route, doc_id: Some(id) } ),
            }}
        }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: MOSTRA_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(route: Signal<Route>, theme: Signal<ThemeMode>) -> Element {
    let mut theme = theme;
    let toggle_label = match theme() {
        ThemeMode::Dark => "Light",
        ThemeMode::Light => "Dark",
    };
    rsx! {
        div { class: "header no-divider",
            div { class: "header-content",
                span { class: "header-wordmark", "Markforge" }
                div { class: "tabs",
                    NavButton { route, target: Route::Documents, label: "Documents" }
                    NavButton { route, target: Route::Generate, label: "Generate" }
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        let next = match theme() {
                            ThemeMode::Dark => ThemeMode::Light,
                            ThemeMode::Light => ThemeMode::Dark,
                        };
                        theme.set(next);
                    },
                    "{toggle_label}"
                }
            }
        }
    }
}

#[component]
fn NavButton(route: Signal<Route>, target: Route, label: &'static str) -> Element {
    let mut route = route;
    let is_active = match (route(), target) {
        (Route::Documents, Route::Documents) => true,
        (Route::Generate, Route::Generate) => true,
        // Document-centric routes highlight the Documents tab.
        (Route::Create | Route::View(_) | Route::Edit(_), Route::Documents) => true,
        _ => false,
    };
    let class = if is_active { "tab active" } else { "tab" };
    rsx! {
        h1 {
            class: class,
            onclick: move |_| route.set(target),
            "{label}"
        }
    }
}
