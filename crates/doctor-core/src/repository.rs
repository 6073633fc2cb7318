//! Storage contract for registered clusters.

use crate::cluster::Cluster;
use crate::context::OpContext;
use crate::error::Result;

/// Durable storage of clusters keyed by name.
///
/// Calls are synchronous. Each one checks `ctx` before touching storage and
/// returns [`Error::Canceled`](crate::Error::Canceled) or
/// [`Error::DeadlineExceeded`](crate::Error::DeadlineExceeded) without
/// mutating anything when the context is already done.
pub trait ClusterRepository: Send + Sync {
    /// Stores a new cluster.
    ///
    /// # Errors
    ///
    /// [`Error::ClusterAlreadyExists`](crate::Error::ClusterAlreadyExists) if
    /// the name is taken.
    fn create_cluster(&self, ctx: &OpContext, cluster: &Cluster) -> Result<()>;

    /// Replaces the stored record for `cluster.name()`.
    ///
    /// # Errors
    ///
    /// [`Error::ClusterNotFound`](crate::Error::ClusterNotFound) if no record
    /// exists.
    fn update_cluster(&self, ctx: &OpContext, cluster: &Cluster) -> Result<()>;

    /// Returns every stored cluster sorted by name.
    fn list_clusters(&self, ctx: &OpContext) -> Result<Vec<Cluster>>;

    /// Removes a stored cluster.
    ///
    /// # Errors
    ///
    /// [`Error::ClusterNotFound`](crate::Error::ClusterNotFound) if no record
    /// exists.
    fn delete_cluster(&self, ctx: &OpContext, name: &str) -> Result<()>;
}
