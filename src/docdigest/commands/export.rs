use crate::commands::{CmdMessage, CmdResult};
use crate::config::DigestConfig;
use crate::error::{DigestError, Result};
use crate::markdown::{combine, html_document, render_html};
use crate::pdf::render_pdf;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Pdf,
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            "html" => Ok(ExportFormat::Html),
            other => Err(format!("Unknown export format: {} (use md, pdf or html)", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Writes the active project's combined document to `{project}_combined_docs.{ext}`.
///
/// The target directory is `out` when given, otherwise the configured export
/// directory. Nothing is written when the combined document is empty.
pub fn run<B: KeyValueStore>(
    store: &ProjectStore<B>,
    config: &DigestConfig,
    format: ExportFormat,
    out: Option<&Path>,
) -> Result<CmdResult> {
    let combined = combine(store.sections());
    let mut result = CmdResult::default();
    if combined.is_empty() {
        result.add_message(CmdMessage::info("Nothing to export!"));
        return Ok(result);
    }

    let dir = out.map(Path::to_path_buf).unwrap_or_else(|| config.export_dir());
    let path = dir.join(export_filename(store.active_project(), format));
    let bytes = match format {
        ExportFormat::Markdown => combined.into_bytes(),
        ExportFormat::Html => {
            html_document(store.active_project(), &render_html(&combined)).into_bytes()
        }
        ExportFormat::Pdf => render_pdf(
            store.active_project(),
            &combined,
            config.pdf_font_size,
            config.pdf_line_width_mm,
        )?,
    };

    write_file(&path, &bytes)?;
    tracing::debug!(path = %path.display(), %format, "exported combined document");

    result.add_message(CmdMessage::success(format!(
        "Exported to {}",
        path.display()
    )));
    result.written_paths.push(path);
    Ok(result)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)
        .map_err(|e| DigestError::Export(format!("cannot write {}: {}", path.display(), e)))
}

const FILENAME_SUFFIX_LEN: usize = 8;

pub fn export_filename(project: &str, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!(
        "{}_combined_docs.{}",
        sanitize_filename(project),
        format.extension()
    ))
}

/// Makes a project name safe for a file name: anything but alphanumerics, `-`
/// and `_` becomes `_`. When that changes the name, a short suffix derived from
/// the original name is appended so "a b" and "a_b" export to different files.
fn sanitize_filename(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe == name {
        return safe;
    }
    let digest = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
        .simple()
        .to_string();
    format!("{}-{}", safe, &digest[..FILENAME_SUFFIX_LEN])
}
