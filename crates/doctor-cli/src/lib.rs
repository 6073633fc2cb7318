//! # doctor-cli
//!
//! Ceph Doctor command-line interface.
//!
//! Provides commands for registering, updating, listing and removing Ceph
//! clusters. Records are stored by [`doctor_persist::FsClusterRepository`];
//! this crate only parses arguments, wires the repository and renders results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, ClusterArgs, ClusterCommands, Commands, Format};
pub use error::CliError;
pub use output::OutputFormat;
