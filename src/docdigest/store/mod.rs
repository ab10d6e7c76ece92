//! # Storage Layer
//!
//! Persistence is a flat, durable **key-value store** of strings, the same shape as
//! a browser's local storage. The [`KeyValueStore`] trait handles the "how" (disk vs
//! memory) while [`project_store::ProjectStore`] handles the "what" (projects,
//! sections, theme, and the rules for reading them back).
//!
//! ## Key Layout
//!
//! | Key                       | Value                                        |
//! |---------------------------|----------------------------------------------|
//! | `projects`                | JSON array of project names                  |
//! | `active_project`          | JSON string, the active project name         |
//! | `dark_mode`               | `true` / `false`                             |
//! | `sections_{projectName}`  | JSON array of `{id, title, content, tags}`   |
//!
//! Section data is keyed per project, so switching projects never touches another
//! project's sections.
//!
//! ## Implementations
//!
//! - [`fs::FsStore`]: one file per key under the data directory, written atomically.
//! - [`memory::MemStore`]: in-memory map for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json
//! ├── projects.kv
//! ├── active_project.kv
//! ├── dark_mode.kv
//! └── sections_My%20Notes.kv
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod project_store;

pub const PROJECTS_KEY: &str = "projects";
pub const ACTIVE_PROJECT_KEY: &str = "active_project";
pub const DARK_MODE_KEY: &str = "dark_mode";
pub const SECTIONS_KEY_PREFIX: &str = "sections";

/// Storage key holding the ordered sections of `project`.
pub fn sections_key(project: &str) -> String {
    format!("{}_{}", SECTIONS_KEY_PREFIX, project)
}

/// Abstract interface for durable string storage.
///
/// Methods take `&self`; implementations that need mutation use interior
/// mutability (the process is single-threaded).
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    /// Returns Ok(None) when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    /// MUST be atomic: a reader sees either the old value or the new one.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
