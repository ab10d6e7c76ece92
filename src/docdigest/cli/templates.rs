//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept in `templates/`, so
//! layout can be edited and diffed apart from code. They are included here as
//! string constants.
//!
//! Templates use explicit line breaks: whitespace is emitted verbatim, no
//! `trim_blocks`. Styles are applied with the `style` filter and semantic names
//! from [`super::styles::names`]; when a style depends on data, the renderer
//! passes the style name in, instead of the template branching on it.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const FULL_SECTION_TEMPLATE: &str = include_str!("templates/full_section.tmp");
pub const PROJECTS_TEMPLATE: &str = include_str!("templates/projects.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
