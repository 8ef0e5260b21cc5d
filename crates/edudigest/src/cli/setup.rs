use clap::{Parser, Subcommand};
use clap_complete::Shell;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "edudigest",
    bin_name = "edudigest",
    version,
    disable_help_subcommand = true,
    after_help = "Positions are 1-based, as printed by `edudigest <kind> list`."
)]
#[command(about = "Manage the ordered content lists of an EduDigest site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: $EDUDIGEST_DATA, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Log what the store is doing (same as RUST_LOG=info)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KindArg {
    Articles,
    News,
    ResourceTabs,
    SidebarTabs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Articles, ordered by priority
    #[command(display_order = 1)]
    Articles {
        #[command(subcommand)]
        action: Option<ListAction>,
    },

    /// News updates, ordered by priority
    #[command(display_order = 2)]
    News {
        #[command(subcommand)]
        action: Option<ListAction>,
    },

    /// Resource page tabs, ordered by order
    #[command(name = "resource-tabs", display_order = 3)]
    ResourceTabs {
        #[command(subcommand)]
        action: Option<ListAction>,
    },

    /// Sidebar tabs, ordered by order
    #[command(name = "sidebar-tabs", display_order = 4)]
    SidebarTabs {
        #[command(subcommand)]
        action: Option<ListAction>,
    },

    /// Show configuration
    #[command(display_order = 20)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Print a shell completion script
    #[command(display_order = 21)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// The list a command operates on, with its action (`list` when omitted).
    pub fn kind_action(&self) -> Option<(KindArg, ListAction)> {
        let (kind, action) = match self {
            Commands::Articles { action } => (KindArg::Articles, action),
            Commands::News { action } => (KindArg::News, action),
            Commands::ResourceTabs { action } => (KindArg::ResourceTabs, action),
            Commands::SidebarTabs { action } => (KindArg::SidebarTabs, action),
            Commands::Config { .. } | Commands::Completions { .. } => return None,
        };
        Some((kind, action.clone().unwrap_or_default()))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ListAction {
    /// List entries in display order
    #[command(alias = "ls")]
    List {
        /// Only entries visible on public pages
        #[arg(long)]
        public: bool,
    },

    /// Show one entry with all its fields
    #[command(alias = "v")]
    Show { position: usize },

    /// Add an entry at the end of the list
    #[command(alias = "n")]
    Create {
        /// Title (or label, for tabs); words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Extra field, e.g. --set author=Ada (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, Value)>,
    },

    /// Edit fields of an entry
    Edit {
        position: usize,

        /// Field to change, e.g. --set content="New body" (repeatable)
        #[arg(long = "set", required = true, value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, Value)>,
    },

    /// Show an entry on public pages
    Activate { position: usize },

    /// Hide an entry from public pages
    Deactivate { position: usize },

    /// Delete an entry and renumber the rest
    #[command(alias = "rm")]
    Delete { position: usize },

    /// Move an entry one place up
    Up { position: usize },

    /// Move an entry one place down
    Down { position: usize },

    /// Drag an entry from one position and drop it at another
    #[command(alias = "mv")]
    Move { from: usize, to: usize },

    /// Apply a full order, e.g. `reorder 3 1 2`
    Reorder {
        #[arg(required = true, num_args = 1..)]
        positions: Vec<usize>,
    },
}

impl Default for ListAction {
    fn default() -> Self {
        ListAction::List { public: false }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get { key: String },
}

/// Parse `key=value`. `true`, `false` and `null` become JSON literals, anything
/// else stays a string.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    let value = match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        other => Value::String(other.to_string()),
    };
    Ok((key.to_string(), value))
}
