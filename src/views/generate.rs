use crate::api::{AiAuthoring, DocumentStore, generated_draft};
use crate::session::{Notice, Severity};
use crate::types::{AiModel, GenerationOptions, MAX_TOKENS_RANGE, TEMPERATURE_RANGE};
use crate::ui::Route;
use crate::views::list::NoticeBanner;
use crate::views::shared::markdown_to_html;
use dioxus::events::FormEvent;
use dioxus::prelude::*;

#[component]
pub fn GenerateView(route: Signal<Route>) -> Element {
    let mut route = route;
    let ai = use_context::<AiAuthoring>();
    let store = use_context::<DocumentStore>();
    let mut prompt = use_signal(String::new);
    let mut options = use_signal(GenerationOptions::default);
    let mut generated = use_signal(String::new);
    let mut generating = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let notice = use_signal(|| Option::<Notice>::None);

    let busy = generating() || saving();

    let on_generate = {
        let ai = ai.clone();
        let mut notice = notice;
        move |_| {
            if generating() || saving() {
                return;
            }
            let ai = ai.clone();
            let request_prompt = prompt();
            let request_options = options();
            generating.set(true);
            spawn(async move {
                match ai.generate(&request_prompt, request_options).await {
                    Ok(content) => {
                        generated.set(content);
                        notice.set(Some(Notice {
                            message: "markdown generated".to_string(),
                            severity: Severity::Success,
                        }));
                    }
                    Err(err) => {
                        notice.set(Some(Notice {
                            message: format!("generation failed: {err}"),
                            severity: Severity::Error,
                        }));
                    }
                }
                generating.set(false);
            });
        }
    };

    // Persisting the result is a separate, explicit step: build a draft from
    // the prompt and generated content, then create it like any other
    // document.
    let on_save = {
        let store = store.clone();
        let mut notice = notice;
        move |_| {
            if generating() || saving() {
                return;
            }
            let content = generated();
            if content.trim().is_empty() {
                notice.set(Some(Notice {
                    message: "nothing to save yet".to_string(),
                    severity: Severity::Warning,
                }));
                return;
            }
            let store = store.clone();
            let draft = generated_draft(&prompt(), &content);
            saving.set(true);
            spawn(async move {
                match store.create(&draft).await {
                    Ok(doc) => route.set(Route::View(doc.id)),
                    Err(err) => {
                        notice.set(Some(Notice {
                            message: format!("save failed: {err}"),
                            severity: Severity::Error,
                        }));
                        saving.set(false);
                    }
                }
            });
        }
    };

    let current_options = options();
    let preview_html = markdown_to_html(&generated());
    let has_result = !generated().trim().is_empty();

    rsx! {
        div { class: "main-container",
            div { class: "page-header",
                h1 { class: "page-title", "Generate Markdown" }
            }

            NoticeBanner { notice }

            div { class: "editor-grid",
                div { class: "panel",
                    h2 { class: "panel-title", "Prompt" }
                    textarea {
                        class: "input",
                        rows: "6",
                        placeholder: "Describe the document you want generated…",
                        value: "{prompt}",
                        disabled: busy,
                        oninput: move |evt: FormEvent| prompt.set(evt.value()),
                    }

                    h3 { class: "panel-subtitle", "Options" }
                    div { class: "form-field",
                        label { class: "control-label", r#for: "gen-temperature",
                            "Temperature: {current_options.temperature:.1}"
                        }
                        input {
                            id: "gen-temperature",
                            r#type: "range",
                            min: "{TEMPERATURE_RANGE.0}",
                            max: "{TEMPERATURE_RANGE.1}",
                            step: "0.1",
                            value: "{current_options.temperature}",
                            disabled: busy,
                            oninput: move |evt: FormEvent| {
                                if let Ok(value) = evt.value().parse::<f32>() {
                                    options.with_mut(|opts| opts.temperature = value);
                                }
                            },
                        }
                    }
                    div { class: "form-field",
                        label { class: "control-label", r#for: "gen-max-tokens",
                            "Max tokens: {current_options.max_tokens}"
                        }
                        input {
                            id: "gen-max-tokens",
                            r#type: "range",
                            min: "{MAX_TOKENS_RANGE.0}",
                            max: "{MAX_TOKENS_RANGE.1}",
                            step: "100",
                            value: "{current_options.max_tokens}",
                            disabled: busy,
                            oninput: move |evt: FormEvent| {
                                if let Ok(value) = evt.value().parse::<u32>() {
                                    options.with_mut(|opts| opts.max_tokens = value);
                                }
                            },
                        }
                    }
                    div { class: "form-field",
                        label { class: "control-label", r#for: "gen-model", "Model" }
                        select {
                            id: "gen-model",
                            value: current_options.model.wire_name(),
                            disabled: busy,
                            onchange: move |evt: FormEvent| {
                                if let Some(model) = AiModel::from_wire_name(&evt.value()) {
                                    options.with_mut(|opts| opts.model = model);
                                }
                            },
                            for model in [AiModel::Gpt35Turbo, AiModel::Gpt4] {
                                option { value: model.wire_name(), "{model.label()}" }
                            }
                        }
                    }

                    button {
                        class: "btn btn-primary btn-block",
                        r#type: "button",
                        disabled: busy || prompt().trim().is_empty(),
                        onclick: on_generate,
                        if generating() { "Generating…" } else { "Generate Markdown" }
                    }
                }

                div { class: "panel",
                    h2 { class: "panel-title", "Result" }
                    if has_result {
                        div { class: "md doc-preview", dangerous_inner_html: "{preview_html}" }
                        button {
                            class: "btn btn-block",
                            r#type: "button",
                            disabled: busy,
                            onclick: on_save,
                            if saving() { "Saving…" } else { "Save as Document" }
                        }
                    } else {
                        p { class: "text-muted", "Generated Markdown will appear here." }
                    }
                }
            }
        }
    }
}
