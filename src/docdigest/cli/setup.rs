use clap::{Parser, Subcommand};
use docdigest::api::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docdigest", bin_name = "docdigest", version)]
#[command(
    about = "Assemble titled note sections into one combined markdown document",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $DOCDIGEST_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a section to the active project
    #[command(alias = "n", display_order = 1)]
    Add {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        /// Tag to attach (repeatable, or comma separated)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// List sections of the active project
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only show sections whose title, content or tags contain this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search sections (same as list --search)
    #[command(display_order = 3)]
    Search { term: String },

    /// Show one or more sections in full
    #[command(alias = "v", display_order = 10)]
    View {
        /// Section positions (as listed) or ids
        #[arg(required = true, num_args = 1..)]
        sections: Vec<String>,
    },

    /// Edit a section; opens $EDITOR when no field is given
    #[command(alias = "e", display_order = 11)]
    Edit {
        /// Section position (as listed) or id
        section: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        /// Replace tags with this comma separated list (empty clears them)
        #[arg(long)]
        tags: Option<String>,
    },

    /// Remove one or more sections
    #[command(alias = "rm", display_order = 12)]
    Remove {
        /// Section positions (as listed) or ids
        #[arg(required = true, num_args = 1..)]
        sections: Vec<String>,
    },

    /// Move a section to another position
    #[command(alias = "mv", display_order = 13)]
    Move { from: usize, to: usize },

    /// Print the combined markdown document
    #[command(display_order = 20)]
    Combine {
        /// Render the markdown for the terminal instead of printing it raw
        #[arg(long)]
        preview: bool,
    },

    /// Copy the combined markdown document to the clipboard
    #[command(display_order = 21)]
    Copy,

    /// Write the combined document to a file
    #[command(display_order = 22)]
    Export {
        /// md, pdf or html
        #[arg(short, long, default_value = "md")]
        format: ExportFormat,

        /// Output directory (defaults to the export-dir setting, then the current directory)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Manage projects
    #[command(subcommand)]
    #[command(alias = "p", display_order = 30)]
    Project(ProjectCommands),

    /// Toggle between dark and light output
    #[command(display_order = 31)]
    Theme {
        /// Show the current theme without changing it
        #[arg(long)]
        show: bool,
    },

    /// Get or set configuration
    #[command(display_order = 32)]
    Config {
        /// Configuration key (export-dir, pdf-font-size, pdf-line-width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects, marking the active one
    #[command(alias = "ls")]
    List,

    /// Create a project and make it active
    Add { name: String },

    /// Make another project active
    Switch { name: String },
}
