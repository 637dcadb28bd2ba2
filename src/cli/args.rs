// src/cli/args.rs
use crate::constants::MAX_DEDUP_WINDOW_MINUTES;
use crate::content::Channel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the note files (overrides the config)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub notes_dir: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify text as URL, code block or plain text (reads stdin without TEXT)
    Classify {
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Where the text came from
        #[arg(long, value_enum, default_value_t = Channel::ClipboardCapture)]
        channel: Channel,
    },

    /// Check whether a string is a URL and print its normalized form
    CheckUrl {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// List notes with ID and title
    List {
        /// Optional search term to filter notes by title
        #[arg(value_name = "SEARCH")]
        search: Option<String>,
    },

    /// Show a note
    Show {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    New {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        content: String,

        /// Comma-separated links
        #[arg(short, long, default_value = "")]
        links: String,
    },

    /// Add a URL to a note's links
    Link {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        #[arg(value_name = "URL")]
        url: String,
    },

    /// Capture clipboard text into a note as it would be captured in the background
    Capture {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },

    /// Export a note as Markdown
    Export {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// Output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Manage the clipboard history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum HistoryAction {
    /// List entries, newest first
    List,
    /// Record text as a clipboard capture
    Add {
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Application the text was copied from
        #[arg(long)]
        app: Option<String>,
    },
    Pin {
        #[arg(value_name = "ENTRY_ID")]
        id: String,
    },
    Unpin {
        #[arg(value_name = "ENTRY_ID")]
        id: String,
    },
    Delete {
        #[arg(value_name = "ENTRY_ID")]
        id: String,
    },
    /// Print an entry's text for copying back to the clipboard
    Restore {
        #[arg(value_name = "ENTRY_ID")]
        id: String,
    },
    Clear {
        /// Keep pinned entries
        #[arg(long)]
        keep_pinned: bool,
    },
    /// Show or change the number of unpinned entries kept
    Limit {
        #[arg(value_name = "LIMIT")]
        limit: Option<usize>,
    },
    /// Show or change capture settings
    Settings {
        #[arg(long)]
        monitoring: Option<bool>,

        #[arg(long)]
        persistence: Option<bool>,

        /// Shortest text (in characters) worth recording
        #[arg(long)]
        min_length: Option<usize>,

        /// Minutes within which identical text is merged into one entry
        #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_DEDUP_WINDOW_MINUTES))]
        dedup_window: Option<u64>,
    },
    /// Show capture rules as JSON, or replace them
    Rules {
        #[arg(value_name = "JSON")]
        json: Option<String>,
    },
}
