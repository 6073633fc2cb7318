//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Ceph Doctor CLI.
#[derive(Parser, Debug, Clone)]
#[command(name = "cephdoctor")]
#[command(version, about = "Ceph Doctor CLI", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// State directory holding registered clusters.
    ///
    /// Defaults to `$XDG_STATE_HOME/ceph-doctor`, then
    /// `$HOME/.local/state/ceph-doctor`.
    #[arg(long, env = "CEPH_DOCTOR_STATE_DIR", value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Give up on storage operations after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Cluster operations.
    Cluster {
        /// Cluster subcommand to execute.
        #[command(subcommand)]
        command: ClusterCommands,
    },
}

/// Cluster subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ClusterCommands {
    /// Register a cluster.
    Register(ClusterArgs),

    /// Replace the key and hosts of a registered cluster.
    Update(ClusterArgs),

    /// Unregister a cluster.
    Unregister {
        /// Cluster name.
        name: String,
    },

    /// List clusters.
    List,

    /// Show one cluster.
    Show {
        /// Cluster name.
        name: String,
    },
}

/// Arguments describing a cluster to store.
#[derive(Args, Debug, Clone)]
pub struct ClusterArgs {
    /// Cluster name.
    pub name: String,

    /// Hosts in host[:port] format (comma-separated).
    pub hosts: String,

    /// Access key.
    pub key: String,
}

impl ClusterArgs {
    /// The raw host entries, split on commas.
    ///
    /// Empty segments are kept so that validation reports them.
    #[must_use]
    pub fn host_list(&self) -> Vec<&str> {
        self.hosts.split(',').collect()
    }
}
