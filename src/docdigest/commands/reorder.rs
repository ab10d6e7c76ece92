use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DigestError, Result};
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

use super::helpers::section_label;

/// Moves the section at 1-based position `from` to 1-based position `to`.
pub fn run<B: KeyValueStore>(
    store: &mut ProjectStore<B>,
    from: usize,
    to: usize,
) -> Result<CmdResult> {
    let len = store.sections().len();
    let from_idx = to_zero_based(from, len)?;
    let to_idx = to_zero_based(to, len)?;

    let mut result = CmdResult::default();
    if from_idx == to_idx {
        result.add_message(CmdMessage::info("Section is already in place."));
        return Ok(result);
    }

    store.reorder_sections(from_idx, to_idx)?;
    let moved = store.sections()[to_idx].clone();
    result.add_message(CmdMessage::success(format!(
        "Section moved {} -> {}: {}",
        from,
        to,
        section_label(&moved)
    )));
    Ok(result.with_affected_sections(vec![moved]))
}

fn to_zero_based(position: usize, len: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .filter(|&i| i < len)
        .ok_or(DigestError::InvalidIndex {
            index: position,
            len,
        })
}
