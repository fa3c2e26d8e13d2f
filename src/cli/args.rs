//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{CACHE_ENV, CONFIG_ENV};
use crate::status::DEFAULT_JOBS;
use crate::usage::DEFAULT_INTERVAL_SECS;

/// gm - Global npm package update monitor.
#[derive(Debug, Parser)]
#[command(name = "gm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the tracked package list
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Path to the status cache
    #[arg(long, global = true, env = CACHE_ENV)]
    pub cache: Option<PathBuf>,

    /// Show verbose output (also reports packages that are not installed)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check tracked packages for updates and write the status cache (default)
    Check(CheckArgs),

    /// Print the one-line summary from the status cache
    Message(MessageArgs),

    /// Show or edit the tracked package list
    Packages(PackagesArgs),

    /// Diagnose the environment gm depends on
    Doctor,

    /// Show token and cost usage from ccusage and ccusage-codex
    Usage(UsageArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Number of concurrent registry lookups
    #[arg(short, long, default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self { jobs: DEFAULT_JOBS }
    }
}

/// Arguments for the `message` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MessageArgs {
    /// Read this cache file instead of the configured one
    pub cache_path: Option<PathBuf>,

    /// Print nothing unless updates are available
    #[arg(long)]
    pub quiet_when_none: bool,

    /// Omit the "[gm] " prefix
    #[arg(long)]
    pub no_prefix: bool,
}

/// Arguments for the `packages` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PackagesArgs {
    #[command(subcommand)]
    pub action: PackagesAction,
}

/// Package list operations.
#[derive(Debug, Clone, Subcommand)]
pub enum PackagesAction {
    /// List tracked packages
    List,

    /// Start tracking packages
    Add {
        /// Package names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Stop tracking packages
    Remove {
        /// Package names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print the path edits are written to
    Path,
}

/// Arguments for the `usage` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UsageArgs {
    /// Only include usage from this date on (YYYYMMDD)
    #[arg(long)]
    pub since: Option<String>,

    /// Redraw the table until interrupted
    #[arg(short, long)]
    pub watch: bool,

    /// Seconds between redraws in watch mode
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: u64,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
