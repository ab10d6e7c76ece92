use super::KeyValueStore;
use crate::error::{DigestError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const VALUE_EXT: &str = ".kv";

/// File-backed key-value store: one file per key under `root`.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{}", encode_key(key), VALUE_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DigestError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(DigestError::Io)?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.key_path(key);

        // Atomic write
        let tmp = self.root.join(format!(".kv-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, value).map_err(DigestError::Io)?;
        fs::rename(&tmp, target).map_err(DigestError::Io)?;
        Ok(())
    }
}

/// Maps an arbitrary key to a file-name-safe string.
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte becomes `%XX`.
/// Distinct keys always map to distinct names.
pub fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}
