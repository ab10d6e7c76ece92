use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::SectionSelector;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

use super::helpers::resolve_selectors;

pub fn run<B: KeyValueStore>(
    store: &ProjectStore<B>,
    selectors: &[SectionSelector],
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_sections(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;

    #[test]
    fn views_in_requested_order() {
        let mut store = ProjectStore::load(MemStore::new()).unwrap();
        store.add_section().unwrap();
        let result = run(
            &store,
            &[SectionSelector::Position(2), SectionSelector::Position(1)],
        )
        .unwrap();
        let positions: Vec<_> = result.listed_sections.iter().map(|d| d.position).collect();
        assert_eq!(positions, [2, 1]);
    }
}
