use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{index_sections, DisplaySection};
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

/// Lists the active project's sections, optionally filtered by `search`.
///
/// Filtering is a view: positions are those of the full sequence and the
/// underlying sections are never touched.
pub fn run<B: KeyValueStore>(store: &ProjectStore<B>, search: Option<&str>) -> Result<CmdResult> {
    let indexed = index_sections(store.sections());
    let listed = match search {
        Some(term) => filter_sections(indexed, term),
        None => indexed,
    };
    Ok(CmdResult::default().with_listed_sections(listed))
}

/// Keeps sections whose title, content, or any tag contains `term`, ignoring case.
pub fn filter_sections(sections: Vec<DisplaySection>, term: &str) -> Vec<DisplaySection> {
    let term_lower = term.to_lowercase();
    sections
        .into_iter()
        .filter(|ds| ds.section.matches(&term_lower))
        .collect()
}
