//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Tree Generator: capture folder layouts as templates and re-create them
#[derive(Parser, Debug)]
#[command(name = "tg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: $XDG_CONFIG_HOME/treegen/treegen.toml)
    #[arg(short, long, global = true, env = "TREEGEN_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a folder structure from a stored template
    Apply {
        /// Template name (default: the template set with `use`)
        name: Option<String>,
        /// Target directory
        #[arg(short, long, default_value = ".", value_hint = ValueHint::DirPath)]
        path: PathBuf,
    },

    /// Author a new template interactively
    Create,

    /// Show a template's structure as a tree
    List {
        /// Template name (interactive selection if omitted)
        name: Option<String>,
    },

    /// Set the default template
    Use {
        /// Template name (interactive selection if omitted)
        name: Option<String>,
    },

    /// Scan an existing directory into a new template
    Clone {
        /// Directory to scan
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
        /// Name of the new template
        name: String,
        /// Template description
        description: String,
        /// Maximum scan depth (0 = unlimited)
        #[arg(short, long, default_value_t = 0)]
        depth: usize,
    },

    /// Delete stored templates
    Remove {
        /// Template names (interactive multi-selection if omitted)
        names: Vec<String>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,

    /// Show config and data paths
    Path,
}
