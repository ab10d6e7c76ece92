use crate::config::DigestConfig;
use crate::index::DisplaySection;
use crate::model::Section;
use std::path::PathBuf;

pub mod add;
pub mod combine;
pub mod config;
pub mod export;
pub mod helpers;
pub mod list;
pub mod projects;
pub mod remove;
pub mod reorder;
pub mod theme;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub struct DigestPaths {
    /// Directory holding the key-value files and `config.json`.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A project as shown by `project list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_sections: Vec<Section>,
    pub listed_sections: Vec<DisplaySection>,
    pub projects: Vec<ProjectEntry>,
    pub combined: Option<String>,
    pub written_paths: Vec<PathBuf>,
    pub config: Option<DigestConfig>,
    pub dark_mode: Option<bool>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_sections(mut self, sections: Vec<Section>) -> Self {
        self.affected_sections = sections;
        self
    }

    pub fn with_listed_sections(mut self, sections: Vec<DisplaySection>) -> Self {
        self.listed_sections = sections;
        self
    }

    pub fn with_projects(mut self, projects: Vec<ProjectEntry>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_combined(mut self, combined: String) -> Self {
        self.combined = Some(combined);
        self
    }

    pub fn with_config(mut self, config: DigestConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = Some(dark_mode);
        self
    }
}
