//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for docdigest operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (string references → [`SectionSelector`]s)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It never prints, never exits, and holds no business logic of its own.
//!
//! `DigestApi<B: KeyValueStore>` is generic over the storage backend:
//! `DigestApi<FsStore>` in production, `DigestApi<MemStore>` in tests.

use crate::commands;
use crate::config::DigestConfig;
use crate::error::{DigestError, Result};
use crate::index::SectionSelector;
use crate::model::SectionField;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;
use std::path::Path;
use std::str::FromStr;

pub struct DigestApi<B: KeyValueStore> {
    store: ProjectStore<B>,
    paths: commands::DigestPaths,
    config: DigestConfig,
}

impl<B: KeyValueStore> DigestApi<B> {
    pub fn new(store: ProjectStore<B>, paths: commands::DigestPaths, config: DigestConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    /// Warnings about stored data that was unreadable and replaced by defaults.
    pub fn load_warnings(&self) -> Vec<commands::CmdMessage> {
        self.store
            .report()
            .discarded_keys
            .iter()
            .map(|key| {
                commands::CmdMessage::warning(format!(
                    "Stored data for '{}' was unreadable and has been reset",
                    key
                ))
            })
            .collect()
    }

    pub fn add_section(&mut self, fields: Vec<SectionField>) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, fields)
    }

    pub fn list_sections(&self, search: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, search)
    }

    pub fn view_sections<I: AsRef<str>>(&self, refs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(refs)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn update_section(
        &mut self,
        reference: &str,
        fields: Vec<SectionField>,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(reference)?;
        commands::update::run(&mut self.store, &selector, fields)
    }

    pub fn remove_sections<I: AsRef<str>>(&mut self, refs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(refs)?;
        commands::remove::run(&mut self.store, &selectors)
    }

    pub fn move_section(&mut self, from: usize, to: usize) -> Result<commands::CmdResult> {
        commands::reorder::run(&mut self.store, from, to)
    }

    pub fn combine(&self) -> Result<commands::CmdResult> {
        commands::combine::run(&self.store)
    }

    pub fn export(
        &self,
        format: ExportFormat,
        out: Option<&Path>,
    ) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, &self.config, format, out)
    }

    pub fn list_projects(&self) -> Result<commands::CmdResult> {
        commands::projects::list(&self.store)
    }

    pub fn add_project(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::projects::add(&mut self.store, name)
    }

    pub fn switch_project(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::projects::switch(&mut self.store, name)
    }

    pub fn toggle_theme(&mut self) -> Result<commands::CmdResult> {
        commands::theme::toggle(&mut self.store)
    }

    pub fn show_theme(&self) -> Result<commands::CmdResult> {
        commands::theme::show(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn dark_mode(&self) -> bool {
        self.store.dark_mode()
    }

    pub fn active_project(&self) -> &str {
        self.store.active_project()
    }

    pub fn paths(&self) -> &commands::DigestPaths {
        &self.paths
    }
}

fn parse_selector(input: &str) -> Result<SectionSelector> {
    SectionSelector::from_str(input).map_err(DigestError::Api)
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<SectionSelector>> {
    inputs.iter().map(|s| parse_selector(s.as_ref())).collect()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::ExportFormat;
pub use commands::{CmdMessage, CmdResult, DigestPaths, MessageLevel, ProjectEntry};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;
    use crate::store::sections_key;
    use std::path::PathBuf;

    fn api_with(backend: MemStore) -> DigestApi<MemStore> {
        DigestApi::new(
            ProjectStore::load(backend).unwrap(),
            DigestPaths {
                data_dir: PathBuf::from("unused"),
            },
            DigestConfig::default(),
        )
    }

    fn api() -> DigestApi<MemStore> {
        api_with(MemStore::new())
    }

    #[test]
    fn add_dispatches_with_fields() {
        let mut api = api();
        let result = api
            .add_section(vec![SectionField::Title("Intro".into())])
            .unwrap();
        assert_eq!(result.affected_sections[0].title, "Intro");
    }

    #[test]
    fn view_parses_positions_and_ids() {
        let mut api = api();
        let added = api.add_section(vec![]).unwrap().affected_sections.remove(0);
        let id = added.id.to_string();
        let result = api.view_sections(&["1", id.as_str()]).unwrap();
        let positions: Vec<_> = result.listed_sections.iter().map(|d| d.position).collect();
        assert_eq!(positions, [1, 2]);
    }

    #[test]
    fn malformed_reference_is_api_error() {
        let api = api();
        assert!(matches!(
            api.view_sections(&["first"]),
            Err(DigestError::Api(_))
        ));
    }

    #[test]
    fn update_dispatches() {
        let mut api = api();
        api.update_section("1", vec![SectionField::Content("body".into())])
            .unwrap();
        let combined = api.combine().unwrap().combined.unwrap();
        assert_eq!(combined, "## \n\nbody");
    }

    #[test]
    fn project_and_theme_dispatch() {
        let mut api = api();
        api.add_project("Work").unwrap();
        assert_eq!(api.active_project(), "Work");
        api.switch_project("default").unwrap();
        assert_eq!(api.active_project(), "default");

        assert!(api.dark_mode());
        api.toggle_theme().unwrap();
        assert!(!api.dark_mode());
    }

    #[test]
    fn corrupt_data_surfaces_as_warning() {
        let backend = MemStore::new();
        backend
            .set(&sections_key("default"), "{not json")
            .unwrap();
        let api = api_with(backend);
        let warnings = api.load_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, MessageLevel::Warning);
        assert!(warnings[0].content.contains("sections_default"));
    }

    #[test]
    fn clean_load_has_no_warnings() {
        assert!(api().load_warnings().is_empty());
    }
}
