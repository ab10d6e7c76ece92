use crate::error::{DigestError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses wl-copy, xclip or xsel, first one found
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut last_err = None;
    for &(program, args) in CANDIDATES {
        match pipe_to(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!(program, error = %e, "clipboard command failed");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        DigestError::Clipboard("Clipboard not supported on this platform".to_string())
    }))
}

type Candidate = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const CANDIDATES: &[Candidate] = &[("pbcopy", &[])];

#[cfg(target_os = "linux")]
const CANDIDATES: &[Candidate] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "windows")]
const CANDIDATES: &[Candidate] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CANDIDATES: &[Candidate] = &[];

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| DigestError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| DigestError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| DigestError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(DigestError::Clipboard(format!(
            "{} exited with error",
            program
        )))
    }
}
