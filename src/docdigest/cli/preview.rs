//! Terminal rendering of markdown, for `combine --preview`.
//!
//! This walks pulldown-cmark events and writes styled plain text: headings keep
//! their `#` markers, lists get bullets or numbers, code blocks are indented, and
//! rules become a line. Anything else falls back to its text.

use super::render::Output;
use super::styles::{names, theme_for, Theme};
use docdigest::markdown::markdown_options;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

const RULE_WIDTH: usize = 40;
const CODE_INDENT: &str = "    ";

struct Preview {
    theme: &'static Theme,
    use_color: bool,
    out: String,
    styles: Vec<&'static str>,
    lists: Vec<Option<u64>>,
    links: Vec<String>,
    in_code_block: bool,
}

impl Preview {
    fn new(output: Output) -> Self {
        Self {
            theme: theme_for(output.dark),
            use_color: output.use_color,
            out: String::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            links: Vec::new(),
            in_code_block: false,
        }
    }

    fn styled(&mut self, name: &str, text: &str) {
        let rendered = self.theme.apply(name, text, self.use_color);
        self.out.push_str(&rendered);
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                self.out.push_str(CODE_INDENT);
                self.styled(names::CODE, line);
                self.out.push('\n');
            }
            return;
        }
        let style = self.styles.last().copied().unwrap_or(names::REGULAR);
        self.styled(style, text);
    }

    fn end_block(&mut self) {
        if self.lists.is_empty() {
            self.out.push_str("\n\n");
        } else if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                let marker = "#".repeat(level as usize);
                self.styled(names::HEADING, &format!("{} ", marker));
                self.styles.push(names::HEADING);
            }
            Tag::Emphasis => self.styles.push(names::EMPHASIS),
            Tag::Strong => self.styles.push(names::STRONG),
            Tag::Strikethrough | Tag::BlockQuote { .. } => self.styles.push(names::MUTED),
            Tag::CodeBlock(kind) => {
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.out.push_str(CODE_INDENT);
                        self.styled(names::FAINT, &lang);
                        self.out.push('\n');
                    }
                }
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if !self.lists.is_empty() && !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
                self.lists.push(start);
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                self.out.push_str(&"  ".repeat(depth));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.styled(names::BULLET, &marker);
            }
            Tag::Link { dest_url, .. } => {
                self.links.push(dest_url.to_string());
                self.styles.push(names::LINK);
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading { .. } => {
                self.styles.pop();
                self.out.push_str("\n\n");
            }
            TagEnd::Paragraph => self.end_block(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::BlockQuote { .. } => {
                self.styles.pop();
                self.end_block();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.end_block();
            }
            TagEnd::List { .. } => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            TagEnd::Item => {
                if !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.links.pop() {
                    self.styled(names::MUTED, &format!(" <{}>", url));
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> String {
        let mut out = self.out.trim_end().to_string();
        out.push('\n');
        out
    }
}

/// Renders markdown for the terminal.
pub fn render_preview(markdown: &str, output: Output) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let mut preview = Preview::new(output);
    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Start(tag) => preview.start(tag),
            Event::End(tag) => preview.end(tag),
            Event::Text(text) => preview.text(&text),
            Event::Code(code) => preview.styled(names::CODE, &code),
            Event::Html(html) | Event::InlineHtml(html) => preview.out.push_str(&html),
            Event::SoftBreak | Event::HardBreak => preview.out.push('\n'),
            Event::Rule => {
                preview.styled(names::RULE, &"─".repeat(RULE_WIDTH));
                preview.out.push_str("\n\n");
            }
            Event::TaskListMarker(done) => {
                preview.out.push_str(if done { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }
    preview.finish()
}
