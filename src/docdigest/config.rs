use crate::error::{DigestError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PDF_FONT_SIZE: f32 = 10.0;
const DEFAULT_PDF_LINE_WIDTH_MM: f32 = 180.0;

/// Keys accepted by [`DigestConfig::get`] and [`DigestConfig::set`], in display order.
pub const CONFIG_KEYS: &[&str] = &["export-dir", "pdf-font-size", "pdf-line-width"];

/// Configuration for docdigest, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DigestConfig {
    /// Directory export files are written to (current directory when unset)
    #[serde(default)]
    pub export_dir: Option<String>,

    /// Font size, in points, for PDF export
    #[serde(default = "default_pdf_font_size")]
    pub pdf_font_size: f32,

    /// Line width, in millimetres, that PDF text is wrapped to
    #[serde(default = "default_pdf_line_width")]
    pub pdf_line_width_mm: f32,
}

fn default_pdf_font_size() -> f32 {
    DEFAULT_PDF_FONT_SIZE
}

fn default_pdf_line_width() -> f32 {
    DEFAULT_PDF_LINE_WIDTH_MM
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            pdf_font_size: DEFAULT_PDF_FONT_SIZE,
            pdf_line_width_mm: DEFAULT_PDF_LINE_WIDTH_MM,
        }
    }
}

impl DigestConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DigestError::Io)?;
        let config: DigestConfig =
            serde_json::from_str(&content).map_err(DigestError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DigestError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DigestError::Serialization)?;
        fs::write(config_path, content).map_err(DigestError::Io)?;
        Ok(())
    }

    /// Export directory, falling back to the current directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "export-dir" => Some(self.export_dir.clone().unwrap_or_default()),
            "pdf-font-size" => Some(self.pdf_font_size.to_string()),
            "pdf-line-width" => Some(self.pdf_line_width_mm.to_string()),
            _ => None,
        }
    }

    /// Sets `key` from its string form. An empty `export-dir` unsets it.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "export-dir" => {
                let value = value.trim();
                self.export_dir = (!value.is_empty()).then(|| value.to_string());
            }
            "pdf-font-size" => self.pdf_font_size = parse_positive(key, value)?,
            "pdf-line-width" => self.pdf_line_width_mm = parse_positive(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(String, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|k| self.get(k).map(|v| (k.to_string(), v)))
            .collect()
    }
}

fn parse_positive(key: &str, value: &str) -> std::result::Result<f32, String> {
    match value.trim().parse::<f32>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(format!("{} must be a positive number, got {:?}", key, value)),
    }
}
