//! JSON file-backed cluster storage for Ceph Doctor.
//!
//! Provides [`FsClusterRepository`], an implementation of
//! [`doctor_core::ClusterRepository`] that keeps one record per cluster under
//! `<root>/clusters/`. The root defaults to `$XDG_STATE_HOME/ceph-doctor` or
//! `$HOME/.local/state/ceph-doctor`.

#![forbid(unsafe_code)]

pub mod paths;
pub mod record;
pub mod repository;

pub use paths::{APP_DIR_NAME, default_root_dir, resolve_root_dir};
pub use record::ClusterRecord;
pub use repository::{CLUSTERS_DIR, FsClusterRepository};
