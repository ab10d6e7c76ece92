use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::SectionSelector;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

use super::helpers::{resolve_selectors, section_label};

pub fn run<B: KeyValueStore>(
    store: &mut ProjectStore<B>,
    selectors: &[SectionSelector],
) -> Result<CmdResult> {
    // Resolve everything up front: positions shift as sections are removed.
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for ds in resolved {
        match store.remove_section(&ds.section.id)? {
            Some(removed) => {
                result.add_message(CmdMessage::success(format!(
                    "Section removed ({}): {}",
                    ds.position,
                    section_label(&removed)
                )));
                result.affected_sections.push(removed);
            }
            None => result.add_message(CmdMessage::info(format!(
                "Section {} was already removed",
                ds.position
            ))),
        }
    }

    Ok(result)
}
