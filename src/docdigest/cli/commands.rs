use super::preview::render_preview;
use super::render::{
    print_messages, render_full_sections, render_messages, render_projects, render_section_list,
    render_text_list, Output,
};
use super::setup::{Cli, Commands, ProjectCommands};
use clap::Parser;
use docdigest::api::{CmdMessage, ConfigAction, DigestApi, ExportFormat};
use docdigest::clipboard::copy_to_clipboard;
use docdigest::editor::{edit_content, EditorContent};
use docdigest::error::{DigestError, Result};
use docdigest::init::{initialize, resolve_data_dir};
use docdigest::model::{parse_tags, SectionField};
use docdigest::store::fs::FsStore;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct AppContext {
    api: DigestApi<FsStore>,
}

impl AppContext {
    fn output(&self) -> Output {
        Output::detect(self.api.dark_mode())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let mut ctx = init_context(data_dir)?;

    let warnings = ctx.api.load_warnings();
    if !warnings.is_empty() {
        eprint!("{}", render_messages(&warnings, ctx.output()));
    }

    match cli.command {
        Some(Commands::Add {
            title,
            content,
            tags,
        }) => handle_add(&mut ctx, title, content, tags),
        Some(Commands::List { search }) => handle_list(&ctx, search),
        Some(Commands::Search { term }) => handle_list(&ctx, Some(term)),
        Some(Commands::View { sections }) => handle_view(&ctx, sections),
        Some(Commands::Edit {
            section,
            title,
            content,
            tags,
        }) => handle_edit(&mut ctx, section, title, content, tags),
        Some(Commands::Remove { sections }) => handle_remove(&mut ctx, sections),
        Some(Commands::Move { from, to }) => handle_move(&mut ctx, from, to),
        Some(Commands::Combine { preview }) => handle_combine(&ctx, preview),
        Some(Commands::Copy) => handle_copy(&ctx),
        Some(Commands::Export { format, out }) => handle_export(&ctx, format, out),
        Some(Commands::Project(cmd)) => match cmd {
            ProjectCommands::List => handle_project_list(&ctx),
            ProjectCommands::Add { name } => handle_project_add(&mut ctx, name),
            ProjectCommands::Switch { name } => handle_project_switch(&mut ctx, name),
        },
        Some(Commands::Theme { show }) => handle_theme(&mut ctx, show),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None),
    }
}

/// Logs go to stderr so stdout stays clean for piping the combined document.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "docdigest=debug"
    } else {
        "docdigest=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed when run from tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn init_context(data_dir: PathBuf) -> Result<AppContext> {
    let ctx = initialize(data_dir)?;
    Ok(AppContext { api: ctx.api })
}

fn handle_add(
    ctx: &mut AppContext,
    title: Option<String>,
    content: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let mut fields = Vec::new();
    if let Some(title) = title {
        fields.push(SectionField::Title(title));
    }
    if let Some(content) = content {
        fields.push(SectionField::Content(content));
    }
    if !tags.is_empty() {
        fields.push(SectionField::Tags(
            tags.iter().flat_map(|t| parse_tags(t)).collect(),
        ));
    }

    let result = ctx.api.add_section(fields)?;
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_list(ctx: &AppContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.list_sections(search.as_deref())?;
    let empty_message = match &search {
        Some(term) => format!("No sections match \"{}\".", term),
        None => "No sections found.".to_string(),
    };
    print!(
        "{}",
        render_section_list(&result.listed_sections, &empty_message, ctx.output())
    );
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_view(ctx: &AppContext, sections: Vec<String>) -> Result<()> {
    let result = ctx.api.view_sections(&sections)?;
    print!(
        "{}",
        render_full_sections(&result.listed_sections, ctx.output())
    );
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    section: String,
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let mut fields = Vec::new();
    if let Some(title) = title {
        fields.push(SectionField::Title(title));
    }
    if let Some(content) = content {
        fields.push(SectionField::Content(content));
    }
    if let Some(tags) = tags {
        fields.push(SectionField::Tags(parse_tags(&tags)));
    }

    if fields.is_empty() {
        fields = edit_in_editor(ctx, &section)?;
        if fields.is_empty() {
            print_messages(&[CmdMessage::info("No changes.")], ctx.output());
            return Ok(());
        }
    }

    let result = ctx.api.update_section(&section, fields)?;
    print_messages(&result.messages, ctx.output());
    Ok(())
}

/// Opens the section in `$EDITOR` and returns the fields that changed.
fn edit_in_editor(ctx: &AppContext, section: &str) -> Result<Vec<SectionField>> {
    let current = ctx
        .api
        .view_sections(&[section])?
        .listed_sections
        .into_iter()
        .next()
        .ok_or_else(|| DigestError::SectionNotFound(section.to_string()))?
        .section;

    let initial = EditorContent::new(current.title, current.content);
    let edited = edit_content(&initial)?;
    Ok(initial.changed_fields(&edited))
}

fn handle_remove(ctx: &mut AppContext, sections: Vec<String>) -> Result<()> {
    let result = ctx.api.remove_sections(&sections)?;
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_move(ctx: &mut AppContext, from: usize, to: usize) -> Result<()> {
    let result = ctx.api.move_section(from, to)?;
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_combine(ctx: &AppContext, preview: bool) -> Result<()> {
    let combined = ctx.api.combine()?.combined.unwrap_or_default();
    if combined.is_empty() {
        return Ok(());
    }
    if preview {
        print!("{}", render_preview(&combined, ctx.output()));
    } else {
        println!("{}", combined);
    }
    Ok(())
}

fn handle_copy(ctx: &AppContext) -> Result<()> {
    let combined = ctx.api.combine()?.combined.unwrap_or_default();
    let message = if combined.is_empty() {
        CmdMessage::info("Nothing to copy!")
    } else {
        copy_to_clipboard(&combined)?;
        CmdMessage::success("Combined markdown copied to clipboard.")
    };
    print_messages(&[message], ctx.output());
    Ok(())
}

fn handle_export(ctx: &AppContext, format: ExportFormat, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(format, out.as_deref())?;
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_project_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_projects()?;
    print!("{}", render_projects(&result.projects, ctx.output()));
    Ok(())
}

fn handle_project_add(ctx: &mut AppContext, name: String) -> Result<()> {
    let result = ctx.api.add_project(&name)?;
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_project_switch(ctx: &mut AppContext, name: String) -> Result<()> {
    let result = ctx.api.switch_project(&name)?;
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, show: bool) -> Result<()> {
    let result = if show {
        ctx.api.show_theme()?
    } else {
        ctx.api.toggle_theme()?
    };
    // Output follows the theme just set.
    print_messages(&result.messages, ctx.output());
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            let lines: Vec<String> = config
                .list_all()
                .into_iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect();
            print!(
                "{}",
                render_text_list(&lines, "No configuration values.", ctx.output())
            );
        }
    }
    print_messages(&result.messages, ctx.output());
    Ok(())
}
