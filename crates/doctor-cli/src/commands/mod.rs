//! CLI command implementations.
//!
//! - [`cluster`] - Cluster registration and listing

pub mod cluster;

pub use cluster::ClusterCommand;
