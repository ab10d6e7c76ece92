//! # Section Addressing
//!
//! Sections carry a UUID, which is stable but unpleasant to type. On the command
//! line they are addressed by their **position** instead: the 1-based place of the
//! section in the active project's full sequence. Positions are the same numbers the
//! list view prints, and they stay put while filtering: `list --search api` may show
//! only `2` and `5`, and `view 5` still means the fifth section.
//!
//! Because reordering changes positions, a full UUID is accepted too wherever a
//! position is.

use crate::model::Section;
use std::str::FromStr;
use uuid::Uuid;

/// A user input selecting one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSelector {
    /// 1-based position in the active project.
    Position(usize),
    Id(Uuid),
}

impl FromStr for SectionSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return Ok(SectionSelector::Position(n));
        }
        Uuid::parse_str(s)
            .map(SectionSelector::Id)
            .map_err(|_| format!("Invalid section reference: {}", s))
    }
}

impl std::fmt::Display for SectionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionSelector::Position(n) => write!(f, "{}", n),
            SectionSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// A section together with its 1-based position in the active project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySection {
    pub position: usize,
    pub section: Section,
}

/// Pairs every section with its position, in order.
pub fn index_sections(sections: &[Section]) -> Vec<DisplaySection> {
    sections
        .iter()
        .enumerate()
        .map(|(i, section)| DisplaySection {
            position: i + 1,
            section: section.clone(),
        })
        .collect()
}
