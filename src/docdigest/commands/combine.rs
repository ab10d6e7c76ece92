use crate::commands::CmdResult;
use crate::error::Result;
use crate::markdown::combine;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

/// Combines the active project's sections into one markdown document.
pub fn run<B: KeyValueStore>(store: &ProjectStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_combined(combine(store.sections())))
}
