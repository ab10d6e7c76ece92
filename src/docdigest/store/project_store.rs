//! # Project/Section Store
//!
//! [`ProjectStore`] is the single state container of the application. It owns:
//!
//! - the known project names (always containing [`DEFAULT_PROJECT`]),
//! - the active project (always one of the known names),
//! - the ordered sections of the active project,
//! - the dark-mode preference.
//!
//! ## Write-Through
//!
//! Every mutation that changes any of the above is written to the backend before
//! the in-memory state is updated. If the write fails, the error is returned and
//! the prior state is kept, so at worst a mutation is a no-op.
//!
//! ## Reading Back
//!
//! On [`ProjectStore::load`] and on every project switch, state is rebuilt from the
//! backend. Missing keys fall back to defaults. Unparseable values are treated as
//! missing: the stored data is discarded and the default is written back in its
//! place, so the same value is never reported twice. Each discard is logged and recorded in the [`LoadReport`] so a UI can tell
//! the user, but it is never an error.

use super::{sections_key, KeyValueStore, ACTIVE_PROJECT_KEY, DARK_MODE_KEY, PROJECTS_KEY};
use crate::error::{DigestError, Result};
use crate::model::{Section, SectionField, DEFAULT_PROJECT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

const DEFAULT_DARK_MODE: bool = true;

/// Keys whose stored values could not be read and were replaced by defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub discarded_keys: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.discarded_keys.is_empty()
    }
}

pub struct ProjectStore<B: KeyValueStore> {
    backend: B,
    projects: Vec<String>,
    active_project: String,
    sections: Vec<Section>,
    dark_mode: bool,
    report: LoadReport,
}

impl<B: KeyValueStore> ProjectStore<B> {
    /// Rebuilds application state from `backend`.
    ///
    /// Fails only on backend I/O errors, never on malformed data.
    pub fn load(backend: B) -> Result<Self> {
        let mut report = LoadReport::default();

        let stored_projects: Option<Vec<String>> =
            read_json(&backend, PROJECTS_KEY, &mut report)?;
        let projects = normalize_projects(stored_projects.unwrap_or_default());

        let dark_mode = read_json::<bool>(&backend, DARK_MODE_KEY, &mut report)?
            .unwrap_or(DEFAULT_DARK_MODE);

        let stored_active: Option<String> = read_json(&backend, ACTIVE_PROJECT_KEY, &mut report)?;
        let mut reset_active = false;
        let active_project = match stored_active {
            Some(name) if projects.contains(&name) => name,
            Some(name) => {
                tracing::warn!(project = %name, "stored active project is unknown, using default");
                reset_active = true;
                DEFAULT_PROJECT.to_string()
            }
            None => DEFAULT_PROJECT.to_string(),
        };

        // Discarded values are replaced on disk so they are reported only once.
        for key in &report.discarded_keys {
            match key.as_str() {
                PROJECTS_KEY => write_json(&backend, PROJECTS_KEY, &projects)?,
                DARK_MODE_KEY => write_json(&backend, DARK_MODE_KEY, &dark_mode)?,
                ACTIVE_PROJECT_KEY => reset_active = true,
                _ => {}
            }
        }
        if reset_active {
            write_json(&backend, ACTIVE_PROJECT_KEY, &active_project)?;
        }

        let mut store = Self {
            backend,
            projects,
            active_project: active_project.clone(),
            sections: Vec::new(),
            dark_mode,
            report,
        };
        store.sections = store.load_or_init_sections(&active_project)?;
        Ok(store)
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn active_project(&self) -> &str {
        &self.active_project
    }

    /// Sections of the active project, in combination order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// What was discarded while reading state, since this store was loaded.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Position of the section with `id` in the active project.
    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// Appends a new empty section to the active project and returns it.
    pub fn add_section(&mut self) -> Result<Section> {
        let section = Section::empty();
        let mut next = self.sections.clone();
        next.push(section.clone());
        self.commit_sections(next)?;
        Ok(section)
    }

    /// Removes the section with `id`. Returns the removed section, or `None`
    /// (without touching storage) when no section matches.
    pub fn remove_section(&mut self, id: &Uuid) -> Result<Option<Section>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };
        let mut next = self.sections.clone();
        let removed = next.remove(pos);
        self.commit_sections(next)?;
        Ok(Some(removed))
    }

    /// Replaces one field of the section with `id`. Returns false when no
    /// section matches.
    pub fn update_section(&mut self, id: &Uuid, field: SectionField) -> Result<bool> {
        let Some(pos) = self.position(id) else {
            return Ok(false);
        };
        let mut next = self.sections.clone();
        next[pos].apply(field);
        self.commit_sections(next)?;
        Ok(true)
    }

    /// Moves the section at `from` to `to` (0-based), shifting the ones between.
    pub fn reorder_sections(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.sections.len();
        for index in [from, to] {
            if index >= len {
                return Err(DigestError::InvalidIndex { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        let mut next = self.sections.clone();
        let moved = next.remove(from);
        next.insert(to, moved);
        self.commit_sections(next)
    }

    /// Makes `name` the active project and loads its sections.
    pub fn set_active_project(&mut self, name: &str) -> Result<()> {
        if !self.projects.iter().any(|p| p == name) {
            return Err(DigestError::UnknownProject(name.to_string()));
        }
        let sections = self.load_or_init_sections(name)?;
        write_json(&self.backend, ACTIVE_PROJECT_KEY, &name)?;
        tracing::debug!(project = name, sections = sections.len(), "switched project");
        self.active_project = name.to_string();
        self.sections = sections;
        Ok(())
    }

    /// Registers a new project, makes it active, and gives it one empty section.
    /// Returns the trimmed name actually used.
    pub fn add_project(&mut self, name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.projects.iter().any(|p| p == trimmed) {
            return Err(DigestError::InvalidName(name.to_string()));
        }
        let trimmed = trimmed.to_string();

        let mut projects = self.projects.clone();
        projects.push(trimmed.clone());
        let sections = vec![Section::empty()];

        // The project list goes last: until it is written, the new name is unknown
        // and a stale active_project falls back to the default on load.
        write_json(&self.backend, &sections_key(&trimmed), &sections)?;
        write_json(&self.backend, ACTIVE_PROJECT_KEY, &trimmed)?;
        write_json(&self.backend, PROJECTS_KEY, &projects)?;
        tracing::debug!(project = %trimmed, "added project");

        self.projects = projects;
        self.active_project = trimmed.clone();
        self.sections = sections;
        Ok(trimmed)
    }

    /// Flips the dark-mode preference and returns the new value.
    pub fn toggle_theme(&mut self) -> Result<bool> {
        let next = !self.dark_mode;
        write_json(&self.backend, DARK_MODE_KEY, &next)?;
        self.dark_mode = next;
        Ok(next)
    }

    fn commit_sections(&mut self, next: Vec<Section>) -> Result<()> {
        write_json(&self.backend, &sections_key(&self.active_project), &next)?;
        self.sections = next;
        Ok(())
    }

    /// Reads the sections of `project`; when absent or unreadable, persists and
    /// returns a single empty section instead.
    fn load_or_init_sections(&mut self, project: &str) -> Result<Vec<Section>> {
        let key = sections_key(project);
        let stored: Option<Vec<Section>> = read_json(&self.backend, &key, &mut self.report)?;

        let stored = stored.filter(|sections| {
            let unique = has_unique_ids(sections);
            if !unique {
                tracing::warn!(key = %key, "duplicate section ids, discarding stored sections");
                self.report.discarded_keys.push(key.clone());
            }
            unique
        });

        match stored {
            Some(sections) => Ok(sections),
            None => {
                let fresh = vec![Section::empty()];
                write_json(&self.backend, &key, &fresh)?;
                Ok(fresh)
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(
    backend: &impl KeyValueStore,
    key: &str,
    report: &mut LoadReport,
) -> Result<Option<T>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "unreadable stored value, using default");
            report.discarded_keys.push(key.to_string());
            Ok(None)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(
    backend: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    backend.set(key, &raw)?;
    tracing::debug!(key = %key, bytes = raw.len(), "persisted");
    Ok(())
}

/// Trims names, drops blanks and duplicates, and guarantees the default project.
fn normalize_projects(stored: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut projects: Vec<String> = stored
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty() && seen.insert(p.clone()))
        .collect();
    if !projects.iter().any(|p| p == DEFAULT_PROJECT) {
        projects.insert(0, DEFAULT_PROJECT.to_string());
    }
    projects
}

fn has_unique_ids(sections: &[Section]) -> bool {
    let mut ids = HashSet::with_capacity(sections.len());
    sections.iter().all(|s| ids.insert(s.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;

    fn fresh() -> ProjectStore<MemStore> {
        ProjectStore::load(MemStore::new()).unwrap()
    }

    /// Reloads a store from the same backend, as a restarted process would.
    fn reload(store: ProjectStore<MemStore>) -> ProjectStore<MemStore> {
        ProjectStore::load(store.backend).unwrap()
    }

    fn is_empty_section(s: &Section) -> bool {
        s.title.is_empty() && s.content.is_empty() && s.tags.is_empty()
    }

    #[test]
    fn first_run_defaults() {
        let store = fresh();
        assert_eq!(store.projects(), ["default"]);
        assert_eq!(store.active_project(), "default");
        assert_eq!(store.sections().len(), 1);
        assert!(is_empty_section(&store.sections()[0]));
        assert!(store.dark_mode());
        assert!(store.report().is_clean());
    }

    #[test]
    fn first_run_persists_initial_section() {
        let store = fresh();
        let id = store.sections()[0].id;
        let store = reload(store);
        assert_eq!(store.sections()[0].id, id);
    }

    #[test]
    fn add_section_appends_empty_section() {
        let mut store = fresh();
        let added = store.add_section().unwrap();
        assert_eq!(store.sections().len(), 2);
        assert_eq!(store.sections()[1], added);
        assert!(is_empty_section(&added));
    }

    #[test]
    fn add_then_remove_round_trips() {
        let mut store = fresh();
        let first = store.sections()[0].id;
        store
            .update_section(&first, SectionField::Title("keep".into()))
            .unwrap();
        let before = store.sections().to_vec();

        let added = store.add_section().unwrap();
        let removed = store.remove_section(&added.id).unwrap();

        assert_eq!(removed, Some(added));
        assert_eq!(store.sections(), before.as_slice());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut store = fresh();
        let before = store.sections().to_vec();
        assert_eq!(store.remove_section(&Uuid::new_v4()).unwrap(), None);
        assert_eq!(store.sections(), before.as_slice());
    }

    #[test]
    fn update_each_field() {
        let mut store = fresh();
        let id = store.sections()[0].id;
        store.update_section(&id, SectionField::Title("T".into())).unwrap();
        store.update_section(&id, SectionField::Content("C".into())).unwrap();
        store
            .update_section(&id, SectionField::Tags(vec!["a".into(), "b".into()]))
            .unwrap();

        let s = &store.sections()[0];
        assert_eq!((s.title.as_str(), s.content.as_str()), ("T", "C"));
        assert_eq!(s.tags, vec!["a", "b"]);
        assert_eq!(s.id, id);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = fresh();
        let before = store.sections().to_vec();
        let updated = store
            .update_section(&Uuid::new_v4(), SectionField::Title("x".into()))
            .unwrap();
        assert!(!updated);
        assert_eq!(store.sections(), before.as_slice());
    }

    #[test]
    fn updates_survive_reload() {
        let mut store = fresh();
        let id = store.sections()[0].id;
        store.update_section(&id, SectionField::Content("persisted".into())).unwrap();
        let store = reload(store);
        assert_eq!(store.sections()[0].content, "persisted");
    }

    fn titled(store: &mut ProjectStore<MemStore>, titles: &[&str]) {
        let first = store.sections()[0].id;
        store.update_section(&first, SectionField::Title(titles[0].into())).unwrap();
        for title in &titles[1..] {
            let s = store.add_section().unwrap();
            store.update_section(&s.id, SectionField::Title(title.to_string())).unwrap();
        }
    }

    fn titles(store: &ProjectStore<MemStore>) -> Vec<String> {
        store.sections().iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn reorder_moves_forward_and_back() {
        let mut store = fresh();
        titled(&mut store, &["a", "b", "c", "d"]);

        store.reorder_sections(0, 2).unwrap();
        assert_eq!(titles(&store), ["b", "c", "a", "d"]);

        store.reorder_sections(3, 0).unwrap();
        assert_eq!(titles(&store), ["d", "b", "c", "a"]);
    }

    #[test]
    fn reorder_same_index_is_noop() {
        let mut store = fresh();
        titled(&mut store, &["a", "b"]);
        store.reorder_sections(1, 1).unwrap();
        assert_eq!(titles(&store), ["a", "b"]);
    }

    #[test]
    fn reorder_out_of_bounds_fails_without_change() {
        let mut store = fresh();
        titled(&mut store, &["a", "b"]);
        let err = store.reorder_sections(0, 2).unwrap_err();
        assert!(matches!(err, DigestError::InvalidIndex { index: 2, len: 2 }));
        let err = store.reorder_sections(5, 0).unwrap_err();
        assert!(matches!(err, DigestError::InvalidIndex { index: 5, len: 2 }));
        assert_eq!(titles(&store), ["a", "b"]);
    }

    #[test]
    fn add_project_rejects_blank_name() {
        let mut store = fresh();
        assert!(matches!(
            store.add_project("  "),
            Err(DigestError::InvalidName(_))
        ));
        assert_eq!(store.projects(), ["default"]);
    }

    #[test]
    fn add_project_rejects_duplicate_after_trim() {
        let mut store = fresh();
        assert!(matches!(
            store.add_project("default"),
            Err(DigestError::InvalidName(_))
        ));
        store.add_project("Notes").unwrap();
        assert!(matches!(
            store.add_project("  Notes "),
            Err(DigestError::InvalidName(_))
        ));
    }

    #[test]
    fn add_project_activates_with_one_empty_section() {
        let mut store = fresh();
        store.add_section().unwrap();

        let name = store.add_project("  Notes ").unwrap();
        assert_eq!(name, "Notes");
        assert_eq!(store.active_project(), "Notes");
        assert_eq!(store.projects(), ["default", "Notes"]);
        assert_eq!(store.sections().len(), 1);
        assert!(is_empty_section(&store.sections()[0]));
    }

    #[test]
    fn switching_back_and_forth_preserves_each_project() {
        let mut store = fresh();
        let id = store.sections()[0].id;
        store.update_section(&id, SectionField::Title("default stuff".into())).unwrap();
        let default_sections = store.sections().to_vec();

        store.add_project("Other").unwrap();
        let other_id = store.sections()[0].id;
        store.update_section(&other_id, SectionField::Content("other stuff".into())).unwrap();
        store.add_section().unwrap();
        let other_sections = store.sections().to_vec();

        store.set_active_project("default").unwrap();
        assert_eq!(store.sections(), default_sections.as_slice());

        store.set_active_project("Other").unwrap();
        assert_eq!(store.sections(), other_sections.as_slice());
    }

    #[test]
    fn set_active_unknown_project_fails() {
        let mut store = fresh();
        let err = store.set_active_project("nope").unwrap_err();
        assert!(matches!(err, DigestError::UnknownProject(name) if name == "nope"));
        assert_eq!(store.active_project(), "default");
    }

    #[test]
    fn active_project_and_projects_survive_reload() {
        let mut store = fresh();
        store.add_project("Notes").unwrap();
        let store = reload(store);
        assert_eq!(store.active_project(), "Notes");
        assert_eq!(store.projects(), ["default", "Notes"]);
    }

    #[test]
    fn toggle_theme_flips_and_persists() {
        let mut store = fresh();
        assert!(!store.toggle_theme().unwrap());
        let mut store = reload(store);
        assert!(!store.dark_mode());
        assert!(store.toggle_theme().unwrap());
    }

    #[test]
    fn failed_write_keeps_prior_state() {
        let mut store = fresh();
        let before = store.sections().to_vec();
        store.backend().set_simulate_write_error(true);

        assert!(store.add_section().is_err());
        assert!(store.toggle_theme().is_err());
        assert!(store.add_project("Notes").is_err());

        assert_eq!(store.sections(), before.as_slice());
        assert!(store.dark_mode());
        assert_eq!(store.projects(), ["default"]);
    }

    #[test]
    fn malformed_sections_fall_back_and_are_reported() {
        let backend = MemStore::new();
        backend.set("sections_default", "{not json").unwrap();

        let store = ProjectStore::load(backend).unwrap();
        assert_eq!(store.sections().len(), 1);
        assert!(is_empty_section(&store.sections()[0]));
        assert_eq!(store.report().discarded_keys, ["sections_default"]);

        // The fallback overwrote the corrupt value.
        let store = reload(store);
        assert!(store.report().is_clean());
    }

    #[test]
    fn duplicate_section_ids_are_treated_as_corrupt() {
        let s = Section::empty();
        let backend = MemStore::new();
        backend
            .set("sections_default", &serde_json::to_string(&vec![s.clone(), s]).unwrap())
            .unwrap();

        let store = ProjectStore::load(backend).unwrap();
        assert_eq!(store.sections().len(), 1);
        assert_eq!(store.report().discarded_keys, ["sections_default"]);
    }

    #[test]
    fn malformed_globals_fall_back_to_defaults() {
        let backend = MemStore::new();
        backend.set(PROJECTS_KEY, "nope").unwrap();
        backend.set(DARK_MODE_KEY, "maybe").unwrap();
        backend.set(ACTIVE_PROJECT_KEY, "[1]").unwrap();

        let store = ProjectStore::load(backend).unwrap();
        assert_eq!(store.projects(), ["default"]);
        assert!(store.dark_mode());
        assert_eq!(store.active_project(), "default");
        assert_eq!(store.report().discarded_keys.len(), 3);
    }

    #[test]
    fn malformed_globals_are_reset_in_storage() {
        let backend = MemStore::new();
        backend.set(PROJECTS_KEY, "nope").unwrap();
        backend.set(DARK_MODE_KEY, "maybe").unwrap();
        backend.set(ACTIVE_PROJECT_KEY, "[1]").unwrap();

        let store = ProjectStore::load(backend).unwrap();
        assert!(!store.report().is_clean());

        let store = reload(store);
        assert!(store.report().is_clean());
        assert_eq!(store.backend().get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(
            store.backend().get(PROJECTS_KEY).unwrap().as_deref(),
            Some(r#"["default"]"#)
        );
        assert_eq!(
            store.backend().get(ACTIVE_PROJECT_KEY).unwrap().as_deref(),
            Some(r#""default""#)
        );
    }

    #[test]
    fn interrupted_add_project_leaves_no_known_project() {
        for allowed_writes in 0..3 {
            let mut store = fresh();
            store.backend().set_write_budget(Some(allowed_writes));
            assert!(store.add_project("Notes").is_err());
            assert_eq!(store.projects(), ["default"]);

            store.backend().set_write_budget(None);
            let mut store = reload(store);
            assert_eq!(store.projects(), ["default"], "after {} writes", allowed_writes);
            assert_eq!(store.active_project(), "default");

            // Retrying is not rejected as a duplicate.
            assert_eq!(store.add_project("Notes").unwrap(), "Notes");
        }
    }

    #[test]
    fn unknown_stored_active_project_falls_back_to_default() {
        let backend = MemStore::new();
        backend.set(ACTIVE_PROJECT_KEY, "\"ghost\"").unwrap();
        let store = ProjectStore::load(backend).unwrap();
        assert_eq!(store.active_project(), "default");
        assert_eq!(
            store.backend().get(ACTIVE_PROJECT_KEY).unwrap().as_deref(),
            Some(r#""default""#)
        );
    }

    #[test]
    fn stored_projects_are_normalized() {
        let backend = MemStore::new();
        backend
            .set(PROJECTS_KEY, r#"["Notes", " Notes ", "", "Work"]"#)
            .unwrap();
        let store = ProjectStore::load(backend).unwrap();
        assert_eq!(store.projects(), ["default", "Notes", "Work"]);
    }

    #[test]
    fn switching_to_project_without_sections_initializes_one() {
        let backend = MemStore::new();
        backend.set(PROJECTS_KEY, r#"["default", "Bare"]"#).unwrap();
        let mut store = ProjectStore::load(backend).unwrap();

        store.set_active_project("Bare").unwrap();
        assert_eq!(store.sections().len(), 1);
        assert!(store.backend().get("sections_Bare").unwrap().is_some());
    }
}
