use crate::error::{DigestError, Result};
use crate::index::{DisplaySection, SectionSelector};
use crate::model::Section;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;
use uuid::Uuid;

/// Resolves selectors against the active project, failing on the first miss.
pub fn resolve_selectors<B: KeyValueStore>(
    store: &ProjectStore<B>,
    selectors: &[SectionSelector],
) -> Result<Vec<DisplaySection>> {
    selectors
        .iter()
        .map(|sel| resolve_one(store.sections(), sel))
        .collect()
}

pub fn resolve_id<B: KeyValueStore>(
    store: &ProjectStore<B>,
    selector: &SectionSelector,
) -> Result<Uuid> {
    resolve_one(store.sections(), selector).map(|dp| dp.section.id)
}

fn resolve_one(sections: &[Section], selector: &SectionSelector) -> Result<DisplaySection> {
    let found = match selector {
        SectionSelector::Position(n) => n
            .checked_sub(1)
            .and_then(|i| sections.get(i).map(|s| (i, s))),
        SectionSelector::Id(id) => sections.iter().enumerate().find(|(_, s)| &s.id == id),
    };
    found
        .map(|(i, section)| DisplaySection {
            position: i + 1,
            section: section.clone(),
        })
        .ok_or_else(|| DigestError::SectionNotFound(selector.to_string()))
}

/// Label used in user messages: the title, or a placeholder for untitled sections.
pub fn section_label(section: &Section) -> String {
    if section.title.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        section.title.clone()
    }
}
