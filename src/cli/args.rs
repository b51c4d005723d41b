//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Twig - an in-memory commit graph with named branches
#[derive(Parser, Debug)]
#[command(name = "twig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Render query results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a repository script
    #[command(
        name = "run",
        long_about = "Execute a script of repository instructions.\n\n\
            Each run starts from a fresh in-memory repository containing a single, \
            empty 'main' branch. Instructions are read one per line from FILE, or \
            from standard input when FILE is omitted or '-'. Nothing is persisted.",
        after_help = "\
INSTRUCTIONS:
    author <name> <email>   set the author for subsequent commits
    commit <message>        commit on the current branch
    branch <name>           create a branch at the current head
    switch <name>           make <name> the current branch
    head [branch]           print a branch head, or (none)
    branches                list branches; the current one is starred
    log [branch]            print history, newest first
    status                  print the current branch and its head

    Quote arguments containing spaces: commit \"fix the parser\"
    Lines starting with '#' are comments.

WORKFLOW EXAMPLES:
    # Run a script file
    twig run history.twig

    # Pipe instructions in, one line per commit
    printf 'author Jane jane@example.com\\ncommit first\\nlog\\n' | twig run

    # Report every failing line instead of stopping at the first
    twig run --keep-going history.twig"
    )]
    Run {
        /// Script file ('-' for standard input)
        file: Option<PathBuf>,

        /// Report failing lines and continue
        #[arg(long)]
        keep_going: bool,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "View or modify Twig configuration.\n\n\
            Configuration is stored in ~/.twig/config.toml unless --config or \
            $TWIG_CONFIG points elsewhere. Use this command to set the default \
            commit author or log rendering.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    twig config list

    # Get a specific value
    twig config get user.email

    # Set the default author
    twig config set user.name \"Jane Doe\"
    twig config set user.email jane@example.com"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash
    twig completion bash > ~/.local/share/bash-completion/completions/twig

    # Zsh
    twig completion zsh > ~/.zfunc/_twig

    # Fish
    twig completion fish > ~/.config/fish/completions/twig.fish

    # PowerShell
    twig completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
