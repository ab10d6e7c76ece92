use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::SectionSelector;
use crate::model::SectionField;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

use super::helpers::{resolve_selectors, section_label};

/// Applies `fields` to the selected section, in order.
pub fn run<B: KeyValueStore>(
    store: &mut ProjectStore<B>,
    selector: &SectionSelector,
    fields: Vec<SectionField>,
) -> Result<CmdResult> {
    let target = resolve_selectors(store, std::slice::from_ref(selector))?.remove(0);
    let mut result = CmdResult::default();

    if fields.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let names: Vec<&str> = fields.iter().map(SectionField::name).collect();
    let names = names.join(", ");
    for field in fields {
        store.update_section(&target.section.id, field)?;
    }

    if let Some(pos) = store.position(&target.section.id) {
        let updated = store.sections()[pos].clone();
        result.add_message(CmdMessage::success(format!(
            "Section {} updated ({}): {}",
            target.position,
            names,
            section_label(&updated)
        )));
        result.affected_sections.push(updated);
    }
    Ok(result)
}
