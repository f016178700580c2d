use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use once_cell::sync::Lazy;
use time::{
    PrimitiveDateTime, format_description::FormatItem, format_description::well_known::Iso8601,
    macros::format_description,
};

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.footnotes = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options
});

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}

const DOC_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:zero], [year]");

/// Formats a backend ISO-8601 timestamp for display; falls back to the raw
/// string when it does not parse.
pub fn format_doc_date(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "Unknown date".to_string();
    }
    PrimitiveDateTime::parse(timestamp, &Iso8601::DEFAULT)
        .ok()
        .and_then(|datetime| datetime.format(DOC_DATE_FORMAT).ok())
        .unwrap_or_else(|| timestamp.to_string())
}

/// First line worth of plain text for list previews.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    let trimmed = line.trim().trim_start_matches('#').trim();
    let mut preview: String = trimmed.chars().take(max_chars).collect();
    if trimmed.chars().count() > max_chars {
        preview.push('…');
    }
    preview
}
