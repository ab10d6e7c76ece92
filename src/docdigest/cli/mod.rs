//! # CLI Behavior
//!
//! This is **one possible UI client** for docdigest, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes, and output
//! formatting. For the overall architecture see the library crate docs.
//!
//! ## Naked Execution
//!
//! Running `docdigest` with no arguments lists the active project's sections.
//!
//! ## Output Streams
//!
//! - stdout: listings, sections, the combined document, command messages.
//! - stderr: logs (`-v` or `RUST_LOG`) and warnings about reset stored data.
//!
//! `docdigest combine > doc.md` therefore writes exactly the combined markdown.
//!
//! ## Editing
//!
//! `edit N` with field flags updates those fields. Without flags it opens
//! `$EDITOR` on a buffer holding the title, a blank line, then the content; only
//! fields that changed are written back.
//!
//! ## Theme
//!
//! The stored dark/light preference picks the output palette; colors are only
//! emitted when stdout supports them.

mod commands;
mod preview;
mod render;
mod setup;
mod styles;
mod templates;

pub use commands::run;
