//! CLI argument definitions.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::Flavor;

/// Top-level CLI parser for `miler`.
#[derive(Debug, Parser)]
#[command(name = "miler", version, about = "Keep recurring milestones open ahead of time")]
pub struct Cli {
    /// Log progress at info level (`RUST_LOG` overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the milestones the schedule wants, without touching a tracker.
    Plan(ScheduleArgs),
    /// Create or reopen milestones on a GitLab or GitHub project.
    Sync(SyncArgs),
}

/// Which buckets to generate.
#[derive(Debug, Clone, Args)]
pub struct ScheduleArgs {
    /// Bucket size: daily, weekly or monthly.
    #[arg(long, env = "MILER_INTERVAL", default_value = "daily")]
    pub interval: String,

    /// Number of days ahead of the reference date to cover.
    #[arg(long, env = "MILER_ADVANCE", default_value_t = 30)]
    pub advance: u32,

    /// Reference date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Tracker connection and sync behavior.
#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Which buckets to generate.
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Tracker base URL, e.g. `gitlab.example.com` or `https://api.github.com`.
    #[arg(long, env = "MILER_URL")]
    pub url: Option<String>,

    /// API token.
    #[arg(long, env = "MILER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Group, user or organization owning the project.
    #[arg(long, env = "MILER_NAMESPACE")]
    pub namespace: Option<String>,

    /// Project or repository name.
    #[arg(long, env = "MILER_PROJECT")]
    pub project: Option<String>,

    /// Skip API detection and use this flavor.
    #[arg(long = "api", env = "MILER_API", value_enum)]
    pub api: Option<Flavor>,

    /// Keep a plain `http://` base URL instead of upgrading it.
    #[arg(long)]
    pub allow_http: bool,

    /// Print what would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}
