//! # Docdigest Architecture
//!
//! Docdigest assembles titled, tagged text **sections** into one combined markdown
//! document, per named **project**. It is a library that happens to have a CLI
//! client: nothing from `api.rs` inward writes to stdout/stderr or exits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, owns terminal I/O      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses section references (positions, UUIDs)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Operation logic, returns CmdResult                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ProjectStore: write-through state container              │
//! │  - KeyValueStore trait: FsStore (disk), MemStore (tests)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The combined document is never stored. [`markdown::combine`] derives it from the
//! active project's sections whenever it is needed (print, copy, export).
//!
//! ## Testing Strategy
//!
//! 1. **Store and commands**: unit tests against [`store::memory::MemStore`].
//! 2. **API**: dispatch and input parsing.
//! 3. **CLI**: end-to-end in `tests/`, against a temporary data directory.
//!
//! ## Module Overview
//!
//! - [`model`]: `Section` and field updates
//! - [`index`]: section positions and selectors
//! - [`store`]: persistence
//! - [`markdown`]: combining and HTML rendering
//! - [`pdf`]: PDF layout
//! - [`commands`], [`api`], [`init`]: operations and wiring
//! - [`clipboard`], [`editor`]: external collaborators

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod index;
pub mod init;
pub mod markdown;
pub mod model;
pub mod pdf;
pub mod store;
