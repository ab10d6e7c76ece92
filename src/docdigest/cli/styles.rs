//! Styles for the docdigest CLI.
//!
//! Templates refer to styles by semantic name (`section-label`, `tag`, ...) through the
//! `style` filter. Each name maps to a concrete `console::Style` in two palettes, one
//! for dark and one for light terminals. The palette is picked from the stored theme
//! preference (`docdigest theme`), not detected.
//!
//! Both palettes are built once, on first use.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style identifiers shared between templates and renderers.
// Some are only referenced by templates.
#[allow(dead_code)]
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const TITLE: &str = "title";
    pub const UNTITLED: &str = "untitled";
    pub const SECTION_LABEL: &str = "section-label";
    pub const TAG: &str = "tag";
    pub const ACTIVE: &str = "active";
    // Markdown preview
    pub const HEADING: &str = "heading";
    pub const EMPHASIS: &str = "emphasis";
    pub const STRONG: &str = "strong";
    pub const CODE: &str = "code";
    pub const RULE: &str = "rule";
    pub const BULLET: &str = "bullet";
    pub const LINK: &str = "link";
}

/// A named set of styles.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Styles `text` with the named style. Unknown names and `use_color == false`
    /// leave the text as is.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            _ => text.to_string(),
        }
    }
}

pub static DARK_THEME: Lazy<Theme> = Lazy::new(build_dark_theme);
pub static LIGHT_THEME: Lazy<Theme> = Lazy::new(build_light_theme);

pub fn theme_for(dark: bool) -> &'static Theme {
    if dark {
        &DARK_THEME
    } else {
        &LIGHT_THEME
    }
}

fn build_light_theme() -> Theme {
    let regular = Style::new().black();
    let muted = Style::new().color256(rgb_to_ansi256((115, 115, 115)));
    let faint = Style::new().color256(rgb_to_ansi256((173, 173, 173)));
    let accent = Style::new().color256(rgb_to_ansi256((0, 95, 175)));

    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint.clone())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::TITLE, regular.clone().bold())
        .add(names::UNTITLED, faint.clone().italic())
        .add(names::SECTION_LABEL, accent.clone())
        .add(names::TAG, Style::new().color256(rgb_to_ansi256((135, 0, 175))))
        .add(names::ACTIVE, Style::new().green().bold())
        .add(names::HEADING, accent.clone().bold())
        .add(names::EMPHASIS, regular.clone().italic())
        .add(names::STRONG, regular.bold())
        .add(
            names::CODE,
            Style::new()
                .color256(rgb_to_ansi256((175, 0, 0)))
                .on_color256(rgb_to_ansi256((238, 238, 238))),
        )
        .add(names::RULE, faint)
        .add(names::BULLET, accent)
        .add(names::LINK, Style::new().blue().underlined())
}

fn build_dark_theme() -> Theme {
    let regular = Style::new().white();
    let muted = Style::new().color256(rgb_to_ansi256((180, 180, 180)));
    let faint = Style::new().color256(rgb_to_ansi256((110, 110, 110)));
    let accent = Style::new().color256(rgb_to_ansi256((95, 175, 255)));

    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint.clone())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::TITLE, regular.clone().bold())
        .add(names::UNTITLED, faint.clone().italic())
        .add(names::SECTION_LABEL, accent.clone())
        .add(names::TAG, Style::new().color256(rgb_to_ansi256((215, 135, 255))))
        .add(names::ACTIVE, Style::new().green().bold())
        .add(names::HEADING, accent.clone().bold())
        .add(names::EMPHASIS, regular.clone().italic())
        .add(names::STRONG, regular.bold())
        .add(
            names::CODE,
            Style::new()
                .color256(rgb_to_ansi256((255, 175, 95)))
                .on_color256(rgb_to_ansi256((48, 48, 48))),
        )
        .add(names::RULE, faint)
        .add(names::BULLET, accent)
        .add(names::LINK, Style::new().cyan().underlined())
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}
