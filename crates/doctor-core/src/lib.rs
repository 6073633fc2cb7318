//! # doctor-core
//!
//! Domain model for the `cephdoctor` CLI:
//!
//! - [`Hosts`]: validated monitor endpoints, defaulting to port 3300
//! - [`Cluster`]: a named registration with an access key and its hosts
//! - [`ClusterRepository`]: the storage contract implemented by `doctor-persist`
//! - [`OpContext`]: cancellation and deadline carried into every storage call
//!
//! ## Example
//!
//! ```rust
//! use doctor_core::{Cluster, Error};
//!
//! let cluster = Cluster::new("prod", "AQBvaBFZ", ["10.0.0.1", "10.0.0.2:6789"])
//!     .expect("valid cluster");
//! assert_eq!(cluster.hosts().values(), vec!["10.0.0.1:3300", "10.0.0.2:6789"]);
//!
//! let err = Cluster::new("prod", "AQBvaBFZ", ["10.0.0.1", "10.0.0.1:3300"])
//!     .expect_err("duplicate after normalization");
//! assert!(matches!(err, Error::DuplicateHost { .. }));
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod context;
pub mod error;
pub mod hosts;
pub mod repository;

pub use cluster::Cluster;
pub use context::OpContext;
pub use error::{BoxError, Error, Result};
pub use hosts::{DEFAULT_PORT, Hosts};
pub use repository::ClusterRepository;

pub use tokio_util::sync::CancellationToken;
