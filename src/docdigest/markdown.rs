//! # Markdown Combiner
//!
//! Turns the ordered sections of a project into one markdown document:
//!
//! ```text
//! ## {title}
//!
//! {content}
//!
//! ---
//!
//! ## {next title}
//! ...
//! ```
//!
//! [`combine`] is pure: the same sequence (including order) always yields the same
//! string, and an empty sequence yields the empty string. It is invoked on demand
//! by callers, never as a side effect of a store mutation.

use crate::model::Section;
use pulldown_cmark::{html, Options, Parser};

pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Combines sections into a single markdown string, in order.
pub fn combine(sections: &[Section]) -> String {
    sections
        .iter()
        .map(section_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn section_block(section: &Section) -> String {
    format!("## {}\n\n{}", section.title, section.content)
}

/// Renders markdown to an HTML fragment.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Extensions enabled for both HTML export and terminal preview.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Wraps an HTML fragment in a minimal standalone document.
pub fn html_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
