//! The registered cluster entity.

use std::fmt;

use crate::error::{Error, Result};
use crate::hosts::Hosts;

/// A registered Ceph cluster: a unique name, an access key and its monitors.
#[derive(Clone, PartialEq, Eq)]
pub struct Cluster {
    name: String,
    key: String,
    hosts: Hosts,
}

impl Cluster {
    /// Creates a cluster after validating every field.
    ///
    /// Fields are checked in order: name, key, then hosts. Host validation
    /// errors are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyClusterName`], [`Error::EmptyClusterKey`] or any
    /// error from [`Hosts::new`].
    pub fn new<I, S>(name: impl Into<String>, key: impl Into<String>, hosts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyClusterName);
        }

        let key = key.into();
        if key.is_empty() {
            return Err(Error::EmptyClusterKey);
        }

        let hosts = Hosts::new(hosts)?;

        Ok(Self { name, key, hosts })
    }

    /// The cluster's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The access key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The normalized host endpoints.
    #[must_use]
    pub fn hosts(&self) -> &Hosts {
        &self.hosts
    }
}

// Keep the access key out of logs.
impl fmt::Debug for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("name", &self.name)
            .field("key", &"[REDACTED]")
            .field("hosts", &self.hosts)
            .finish()
    }
}
