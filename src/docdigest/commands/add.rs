use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SectionField;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

/// Appends a new section, then fills in whichever fields were given.
pub fn run<B: KeyValueStore>(
    store: &mut ProjectStore<B>,
    fields: Vec<SectionField>,
) -> Result<CmdResult> {
    let added = store.add_section()?;
    for field in fields {
        store.update_section(&added.id, field)?;
    }

    let position = store.sections().len();
    let section = store.sections()[position - 1].clone();

    let mut result = CmdResult::default().with_affected_sections(vec![section]);
    result.add_message(CmdMessage::success(format!(
        "Section {} added to {}",
        position,
        store.active_project()
    )));
    Ok(result)
}
