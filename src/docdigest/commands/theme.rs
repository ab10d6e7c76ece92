use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::project_store::ProjectStore;
use crate::store::KeyValueStore;

pub fn toggle<B: KeyValueStore>(store: &mut ProjectStore<B>) -> Result<CmdResult> {
    let dark = store.toggle_theme()?;
    let mut result = CmdResult::default().with_dark_mode(dark);
    result.add_message(CmdMessage::success(format!(
        "Theme set to {}",
        theme_name(dark)
    )));
    Ok(result)
}

pub fn show<B: KeyValueStore>(store: &ProjectStore<B>) -> Result<CmdResult> {
    let dark = store.dark_mode();
    let mut result = CmdResult::default().with_dark_mode(dark);
    result.add_message(CmdMessage::info(format!("Theme: {}", theme_name(dark))));
    Ok(result)
}

pub fn theme_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}
