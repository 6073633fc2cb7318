//! Directory-backed [`ClusterRepository`].
//!
//! Every cluster lives in its own file, `<root>/clusters/<escaped name>.json`.
//! The directory is the only state: nothing is cached between calls, and
//! listing re-reads every record.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use doctor_core::{Cluster, ClusterRepository, Error, OpContext, Result};
use tempfile::NamedTempFile;

use crate::paths::default_root_dir;
use crate::record::{self, ClusterRecord};

/// Subdirectory of the root holding the record files.
pub const CLUSTERS_DIR: &str = "clusters";

/// Permission bits for record files.
#[cfg(unix)]
const RECORD_MODE: u32 = 0o600;

/// Cluster repository storing one JSON file per cluster.
#[derive(Debug, Clone)]
pub struct FsClusterRepository {
    root: PathBuf,
    clusters_dir: PathBuf,
}

impl FsClusterRepository {
    /// Opens the repository under `root`, creating `clusters/` if needed.
    ///
    /// An empty `root` resolves to the default state directory.
    ///
    /// # Errors
    ///
    /// [`Error::HomeNotSet`] when the default cannot be resolved, or
    /// [`Error::Io`] when the directory cannot be created.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::new_with(root, default_root_dir)
    }

    /// Like [`FsClusterRepository::new`], using `resolve_default` for an empty root.
    ///
    /// # Errors
    ///
    /// Whatever `resolve_default` returns, or [`Error::Io`] when the
    /// directory cannot be created.
    pub fn new_with<F>(root: impl AsRef<Path>, resolve_default: F) -> Result<Self>
    where
        F: FnOnce() -> Result<PathBuf>,
    {
        let root = root.as_ref();
        let root = if root.as_os_str().is_empty() {
            resolve_default()?
        } else {
            root.to_path_buf()
        };

        let clusters_dir = root.join(CLUSTERS_DIR);
        fs::create_dir_all(&clusters_dir)
            .map_err(|e| Error::io("create clusters directory", &clusters_dir, e))?;

        Ok(Self { root, clusters_dir })
    }

    /// The root state directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding record files.
    #[must_use]
    pub fn clusters_dir(&self) -> &Path {
        &self.clusters_dir
    }

    /// Path of the record file for `name`. The file may not exist.
    #[must_use]
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.clusters_dir.join(record::file_name(name))
    }

    fn write_new(path: &Path, bytes: &[u8], name: &str) -> Result<()> {
        let mut file = match record_options().create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::ClusterAlreadyExists {
                    name: name.to_string(),
                });
            }
            Err(e) => return Err(Error::io("create cluster file", path, e)),
        };

        if let Err(e) = write_all_synced(&mut file, bytes) {
            drop(file);
            // The primary error is the write failure; a failed cleanup leaves
            // a record that the next list reports as undecodable.
            let _ = fs::remove_file(path);
            return Err(Error::io("write cluster file", path, e));
        }
        Ok(())
    }

    fn write_replace(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        // Unique per call, so concurrent updates never share a temp file.
        let mut tmp = NamedTempFile::new_in(&self.clusters_dir)
            .map_err(|e| Error::io("create temp cluster file", &self.clusters_dir, e))?;

        let written =
            restrict_permissions(tmp.as_file()).and_then(|()| write_all_synced(tmp.as_file_mut(), bytes));
        if let Err(e) = written {
            return Err(Error::io("write temp cluster file", tmp.path(), e));
        }

        tmp.persist(path)
            .map_err(|e| Error::io("replace cluster file", path, e.error))?;
        Ok(())
    }
}

impl ClusterRepository for FsClusterRepository {
    fn create_cluster(&self, ctx: &OpContext, cluster: &Cluster) -> Result<()> {
        ctx.check()?;

        let path = self.record_path(cluster.name());
        let bytes = ClusterRecord::from(cluster).encode()?;

        ctx.check()?;
        Self::write_new(&path, &bytes, cluster.name())
    }

    fn update_cluster(&self, ctx: &OpContext, cluster: &Cluster) -> Result<()> {
        ctx.check()?;

        let path = self.record_path(cluster.name());
        match fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ClusterNotFound {
                    name: cluster.name().to_string(),
                });
            }
            Err(e) => return Err(Error::io("stat cluster file", &path, e)),
        }

        let bytes = ClusterRecord::from(cluster).encode()?;

        ctx.check()?;
        self.write_replace(&path, &bytes)
    }

    fn list_clusters(&self, ctx: &OpContext) -> Result<Vec<Cluster>> {
        ctx.check()?;

        let entries = fs::read_dir(&self.clusters_dir)
            .map_err(|e| Error::io("read clusters directory", &self.clusters_dir, e))?;

        let mut clusters = Vec::new();
        for entry in entries {
            ctx.check()?;

            let entry =
                entry.map_err(|e| Error::io("read clusters directory", &self.clusters_dir, e))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| Error::io("stat cluster file", &path, e))?;
            if file_type.is_dir() {
                continue;
            }
            if record::cluster_name(&path)?.is_none() {
                continue;
            }

            let bytes = fs::read(&path).map_err(|e| Error::io("read cluster file", &path, e))?;
            clusters.push(ClusterRecord::decode(&path, &bytes)?);
        }

        clusters.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(clusters)
    }

    fn delete_cluster(&self, ctx: &OpContext, name: &str) -> Result<()> {
        ctx.check()?;

        let path = self.record_path(name);
        fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ClusterNotFound {
                name: name.to_string(),
            },
            _ => Error::io("remove cluster file", &path, e),
        })
    }
}

fn record_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(RECORD_MODE);
    }
    options
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(RECORD_MODE))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}

fn write_all_synced(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes)?;
    file.sync_all()
}
