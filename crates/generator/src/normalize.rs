//! Field-level normalization shared by every content type.

use brand_site_core::DEFAULT_ORDER;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use pulldown_cmark::{Event, Options, Parser, TagEnd, html};

/// Character budget for press excerpts
pub const PRESS_EXCERPT_BUDGET: usize = 150;
/// Character budget for the about excerpt
pub const ABOUT_EXCERPT_BUDGET: usize = 200;

const ELLIPSIS: &str = "...";

/// Prefix site-relative asset paths with `/`. Absolute URLs pass through.
pub fn normalize_asset_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') || is_absolute_url(path) {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Same as [`normalize_asset_path`], treating blank values as absent
pub fn normalize_optional_asset(path: Option<String>) -> Option<String> {
    non_blank(path).map(|p| normalize_asset_path(&p))
}

/// `http://`, `https://` or protocol-relative `//`
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Trimmed value, or `None` if absent or only whitespace
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Numeric `order` from a YAML value; anything unusable sorts last.
pub fn order_from_yaml(value: Option<&serde_yaml::Value>) -> f64 {
    let order: Option<f64> = match value {
        Some(serde_yaml::Value::Number(n)) => n.as_f64(),
        Some(serde_yaml::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    order.filter(|n| n.is_finite()).unwrap_or(DEFAULT_ORDER)
}

/// Numeric `order` from a JSON value; anything unusable sorts last.
pub fn order_from_json(value: Option<&serde_json::Value>) -> f64 {
    let order: Option<f64> = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    order.filter(|n| n.is_finite()).unwrap_or(DEFAULT_ORDER)
}

/// Cut `text` to `budget` characters and append `...`, only if it was longer.
pub fn truncate(text: &str, budget: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(budget) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), ELLIPSIS),
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 and `YYYY-MM-DD[ T]HH:MM:SS`
pub fn parse_content_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, markdown_options()));
    out
}

/// Flatten Markdown to plain text with collapsed whitespace
pub fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
