//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the lf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// lf - Filter label-tagged records with boolean expressions
#[derive(Parser, Debug)]
#[command(name = "lf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test one label set against an expression
    #[command(alias = "c")]
    Check {
        /// Filter expression (e.g., "1 & (2 | !3)") or @name of a saved filter
        expression: String,

        /// Labels attached to the item
        #[arg(allow_negative_numbers = true)]
        labels: Vec<i64>,

        /// Always exit with status 0 when the expression compiles
        #[arg(long)]
        no_exit_code: bool,
    },

    /// Print the records whose labels satisfy an expression
    #[command(alias = "s")]
    Select {
        /// Filter expression or @name of a saved filter
        expression: String,

        /// Read records from a file instead of stdin (one per line)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print records that do NOT match
        #[arg(long)]
        invert: bool,

        /// Print only the number of selected records
        #[arg(long)]
        count: bool,
    },

    /// Show how an expression is tokenized and parsed
    Explain {
        /// Filter expression or @name of a saved filter
        expression: String,
    },

    /// Manage saved filters
    Filters {
        #[command(subcommand)]
        command: Option<FiltersCommands>,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Saved filter subcommands
#[derive(Subcommand, Debug)]
pub enum FiltersCommands {
    /// List all saved filters (default)
    List,

    /// Show one saved filter and its parsed form
    Show {
        /// Filter name
        name: String,
    },

    /// Save a filter under a name
    Add {
        /// Filter name
        name: String,

        /// Filter expression
        expression: String,

        /// Replace an existing filter with the same name
        #[arg(long)]
        force: bool,
    },

    /// Delete a saved filter
    #[command(alias = "rm")]
    Remove {
        /// Filter name
        name: String,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration (default)
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Show config file path
    Path,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
