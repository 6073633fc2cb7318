//! Cluster management command implementation.
//!
//! Handles register, update, unregister, list and show against a
//! [`ClusterRepository`].

use std::io::Write;

use doctor_core::{Cluster, ClusterRepository, Error, OpContext};
use tracing::info;

use crate::cli::{ClusterArgs, ClusterCommands};
use crate::error::CliError;
use crate::output::{ClusterDetail, ClusterList, Message, OutputFormat};

/// Handler for cluster subcommands.
pub struct ClusterCommand<'a, R: ?Sized> {
    repo: &'a R,
    ctx: &'a OpContext,
}

impl<'a, R> ClusterCommand<'a, R>
where
    R: ClusterRepository + ?Sized,
{
    /// Creates a new cluster command handler.
    #[must_use]
    pub const fn new(repo: &'a R, ctx: &'a OpContext) -> Self {
        Self { repo, ctx }
    }

    /// Executes the cluster subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if validation, storage or output fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &ClusterCommands,
    ) -> Result<(), CliError> {
        match command {
            ClusterCommands::Register(args) => self.register(out, format, args),
            ClusterCommands::Update(args) => self.update(out, format, args),
            ClusterCommands::Unregister { name } => self.unregister(out, format, name),
            ClusterCommands::List => self.list(out, format),
            ClusterCommands::Show { name } => self.show(out, format, name),
        }
    }

    fn register<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &ClusterArgs,
    ) -> Result<(), CliError> {
        let cluster = Cluster::new(args.name.as_str(), args.key.as_str(), args.host_list())?;
        info!(name = %cluster.name(), hosts = %cluster.hosts(), "cluster register");

        self.repo.create_cluster(self.ctx, &cluster)?;

        format.write(
            out,
            &Message::success(format!("Cluster '{}' registered", cluster.name())),
        )
    }

    fn update<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &ClusterArgs,
    ) -> Result<(), CliError> {
        let cluster = Cluster::new(args.name.as_str(), args.key.as_str(), args.host_list())?;
        info!(name = %cluster.name(), hosts = %cluster.hosts(), "cluster update");

        self.repo.update_cluster(self.ctx, &cluster)?;

        format.write(
            out,
            &Message::success(format!("Cluster '{}' updated", cluster.name())),
        )
    }

    fn unregister<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
    ) -> Result<(), CliError> {
        info!(name = %name, "cluster unregister");

        self.repo.delete_cluster(self.ctx, name)?;

        format.write(
            out,
            &Message::success(format!("Cluster '{name}' unregistered")),
        )
    }

    fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let clusters = self.repo.list_clusters(self.ctx)?;
        format.write(out, &ClusterList::from(clusters.as_slice()))
    }

    fn show<W: Write>(&self, out: &mut W, format: &OutputFormat, name: &str) -> Result<(), CliError> {
        let clusters = self.repo.list_clusters(self.ctx)?;
        let cluster = clusters
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::ClusterNotFound {
                name: name.to_string(),
            })?;
        format.write(out, &ClusterDetail::from(cluster))
    }
}
