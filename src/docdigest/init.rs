use crate::api::{DigestApi, DigestPaths};
use crate::config::DigestConfig;
use crate::error::{DigestError, Result};
use crate::store::fs::FsStore;
use crate::store::project_store::ProjectStore;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "DOCDIGEST_HOME";

pub struct DigestContext {
    pub api: DigestApi<FsStore>,
    pub config: DigestConfig,
}

/// Picks the data directory: the explicit path, then `$DOCDIGEST_HOME`, then the
/// platform data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "docdigest", "docdigest")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DigestError::Api("Could not determine a data directory".to_string()))
}

pub fn initialize(data_dir: PathBuf) -> Result<DigestContext> {
    let config = match DigestConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable config.json, using defaults");
            DigestConfig::default()
        }
    };

    tracing::debug!(data_dir = %data_dir.display(), "loading store");
    let store = ProjectStore::load(FsStore::new(data_dir.clone()))?;
    let api = DigestApi::new(store, DigestPaths { data_dir }, config.clone());

    Ok(DigestContext { api, config })
}
