use crate::commands::{CmdMessage, CmdResult, ProjectEntry};
use crate::error::Result;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

pub fn list<B: KeyValueStore>(store: &ProjectStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_projects(entries(store)))
}

/// Creates a project and makes it active. Empty or duplicate names fail with
/// `InvalidName`.
pub fn add<B: KeyValueStore>(store: &mut ProjectStore<B>, name: &str) -> Result<CmdResult> {
    let name = store.add_project(name)?;
    let mut result = CmdResult::default().with_projects(entries(store));
    result.add_message(CmdMessage::success(format!(
        "Project created and active: {}",
        name
    )));
    Ok(result)
}

pub fn switch<B: KeyValueStore>(store: &mut ProjectStore<B>, name: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if store.active_project() == name {
        result.add_message(CmdMessage::info(format!("Already on project {}", name)));
        return Ok(result.with_projects(entries(store)));
    }

    store.set_active_project(name)?;
    result.add_message(CmdMessage::success(format!(
        "Switched to project {} ({} sections)",
        name,
        store.sections().len()
    )));
    Ok(result.with_projects(entries(store)))
}

fn entries<B: KeyValueStore>(store: &ProjectStore<B>) -> Vec<ProjectEntry> {
    store
        .projects()
        .iter()
        .map(|name| ProjectEntry {
            name: name.clone(),
            is_active: name == store.active_project(),
        })
        .collect()
}
