use crate::error::{DigestError, Result};
use crate::model::SectionField;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// A section's title and content as laid out in an editor buffer.
/// Format: title\n\ncontent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub content: String,
}

impl EditorContent {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }

    pub fn to_buffer(&self) -> String {
        format!("{}\n\n{}", self.title, self.content)
    }

    /// Parses an editor buffer back into title and content.
    ///
    /// The first line is the title. Blank lines between it and the body are
    /// skipped; the body keeps its inner layout but loses trailing whitespace.
    pub fn from_buffer(buffer: &str) -> Self {
        let (title, rest) = buffer.split_once('\n').unwrap_or((buffer, ""));
        let body = rest.trim_start_matches(['\n', '\r']).trim_end();
        Self {
            title: title.trim().to_string(),
            content: body.to_string(),
        }
    }

    /// The fields of `edited` that really differ from `self`.
    ///
    /// `self` is compared in the form it takes after a trip through the buffer,
    /// so saving an untouched buffer yields no changes even when the stored
    /// content ends in a newline.
    pub fn changed_fields(&self, edited: &EditorContent) -> Vec<SectionField> {
        let current = Self::from_buffer(&self.to_buffer());
        let mut fields = Vec::new();
        if edited.title != current.title {
            fields.push(SectionField::Title(edited.title.clone()));
        }
        if edited.content != current.content {
            fields.push(SectionField::Content(edited.content.clone()));
        }
        fields
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in ["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok(fallback.to_string());
        }
    }

    Err(DigestError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| DigestError::Editor("Empty editor command".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| DigestError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(DigestError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Opens an editor on `initial` and returns what the user saved.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!("docdigest-{}.md", uuid::Uuid::new_v4()));
    fs::write(&temp_file, initial.to_buffer())?;

    let result = open_in_editor(&temp_file);
    if let Err(e) = fs::remove_file(&temp_file) {
        tracing::debug!(path = %temp_file.display(), error = %e, "could not remove editor buffer");
    }

    Ok(EditorContent::from_buffer(&result?))
}
