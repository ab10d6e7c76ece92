//! # Rendering
//!
//! Styled terminal output from templates. Layout math (widths, truncation) stays in
//! Rust because it needs Unicode-aware processing; templates pick styles by name.
//!
//! Every public renderer takes an [`Output`] saying which palette to use (from the
//! stored theme preference) and whether to emit colors at all.

use super::styles::{names, theme_for};
use super::templates::{
    FULL_SECTION_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, PROJECTS_TEMPLATE,
    TEXT_LIST_TEMPLATE,
};
use console::Term;
use docdigest::api::{CmdMessage, MessageLevel, ProjectEntry};
use docdigest::index::DisplaySection;
use docdigest::model::Section;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const PREVIEW_INDENT: usize = 4;
const SEPARATOR: &str = "────────────────────────────────";

/// Where and how output is rendered.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub dark: bool,
    pub use_color: bool,
}

impl Output {
    /// Colors on when stdout supports them.
    pub fn detect(dark: bool) -> Self {
        Self {
            dark,
            use_color: Term::stdout().features().colors_supported(),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            dark: true,
            use_color: false,
        }
    }
}

#[derive(Serialize)]
struct SectionLine {
    label: String,
    title: String,
    title_style: &'static str,
    tags: String,
    preview: String,
}

#[derive(Serialize)]
struct ListData {
    sections: Vec<SectionLine>,
    empty: bool,
    empty_message: String,
}

#[derive(Serialize)]
struct FullSectionEntry {
    label: String,
    title: String,
    title_style: &'static str,
    tags: String,
    content: String,
}

#[derive(Serialize)]
struct FullSectionData {
    sections: Vec<FullSectionEntry>,
    empty: bool,
    separator: &'static str,
}

#[derive(Serialize)]
struct ProjectLine {
    name: String,
    is_active: bool,
}

#[derive(Serialize)]
struct ProjectsData {
    projects: Vec<ProjectLine>,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

fn render_template<T: Serialize>(
    template: &'static str,
    data: &T,
    output: Output,
) -> Result<String, minijinja::Error> {
    let theme = theme_for(output.dark);
    let use_color = output.use_color;

    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
    env.add_template("view", template)?;
    env.get_template("view")?.render(data)
}

/// "Section N": how positions are shown to the user.
pub fn section_label(position: usize) -> String {
    format!("Section {}", position)
}

fn title_parts(section: &Section) -> (String, &'static str) {
    if section.title.trim().is_empty() {
        ("(untitled)".to_string(), names::UNTITLED)
    } else {
        (section.title.clone(), names::TITLE)
    }
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the section list: one header line per section plus a one-line content
/// preview. `empty_message` is shown when nothing is listed.
pub fn render_section_list(
    sections: &[DisplaySection],
    empty_message: &str,
    output: Output,
) -> String {
    let lines = sections
        .iter()
        .map(|ds| {
            let label = section_label(ds.position);
            let (title, title_style) = title_parts(&ds.section);
            let tags = format_tags(&ds.section.tags);

            let fixed = label.width() + 2 + if tags.is_empty() { 0 } else { tags.width() + 2 };
            let title = truncate_to_width(&title, LINE_WIDTH.saturating_sub(fixed));

            let first_line: String = ds
                .section
                .content
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .unwrap_or_default()
                .to_string();
            let preview = truncate_to_width(&first_line, LINE_WIDTH - PREVIEW_INDENT);

            SectionLine {
                label,
                title,
                title_style,
                tags,
                preview,
            }
        })
        .collect::<Vec<_>>();

    let data = ListData {
        empty: lines.is_empty(),
        sections: lines,
        empty_message: empty_message.to_string(),
    };
    render_template(LIST_TEMPLATE, &data, output)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Renders sections in full: header, tags, then the content verbatim.
pub fn render_full_sections(sections: &[DisplaySection], output: Output) -> String {
    let entries = sections
        .iter()
        .map(|ds| {
            let (title, title_style) = title_parts(&ds.section);
            FullSectionEntry {
                label: section_label(ds.position),
                title,
                title_style,
                tags: format_tags(&ds.section.tags),
                content: ds.section.content.clone(),
            }
        })
        .collect::<Vec<_>>();

    let data = FullSectionData {
        empty: entries.is_empty(),
        sections: entries,
        separator: SEPARATOR,
    };
    render_template(FULL_SECTION_TEMPLATE, &data, output)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_projects(projects: &[ProjectEntry], output: Output) -> String {
    let data = ProjectsData {
        projects: projects
            .iter()
            .map(|p| ProjectLine {
                name: p.name.clone(),
                is_active: p.is_active,
            })
            .collect(),
    };
    render_template(PROJECTS_TEMPLATE, &data, output).unwrap_or_else(|_| {
        projects
            .iter()
            .map(|p| format!("{}\n", p.name))
            .collect()
    })
}

pub fn render_text_list(lines: &[String], empty_message: &str, output: Output) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };
    render_template(TEXT_LIST_TEMPLATE, &data, output)
        .unwrap_or_else(|_| format!("{}\n", empty_message))
}

pub fn render_messages(messages: &[CmdMessage], output: Output) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render_template(MESSAGES_TEMPLATE, &data, output).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage], output: Output) {
    let rendered = render_messages(messages, output);
    if !rendered.is_empty() {
        print!("{}", rendered);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
