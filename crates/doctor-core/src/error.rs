//! Error types for cluster registration and storage.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed source error for decode failures coming from any record format.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the domain constructors and by cluster repositories.
#[derive(Debug, Error)]
pub enum Error {
    /// The cluster name is the empty string.
    #[error("cluster name is empty")]
    EmptyClusterName,

    /// The cluster access key is the empty string.
    #[error("cluster key is empty")]
    EmptyClusterKey,

    /// No hosts were supplied.
    #[error("cluster hosts are empty")]
    EmptyHosts,

    /// A host entry was blank after trimming.
    #[error("cluster host is empty")]
    EmptyHost,

    /// Two host entries normalize to the same endpoint.
    #[error("cluster host is duplicated: {host}")]
    DuplicateHost {
        /// The normalized endpoint seen twice.
        host: String,
    },

    /// A cluster with this name is already registered.
    #[error("cluster already exists: {name}")]
    ClusterAlreadyExists {
        /// The conflicting cluster name.
        name: String,
    },

    /// No cluster with this name is registered.
    #[error("cluster not found: {name}")]
    ClusterNotFound {
        /// The requested cluster name.
        name: String,
    },

    /// A filesystem operation failed.
    #[error("{operation} {}: {source}", .path.display())]
    Io {
        /// What the repository was doing.
        operation: &'static str,
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored record could not be decoded into a cluster.
    #[error("decode cluster file {}: {source}", .path.display())]
    Decode {
        /// The offending record file.
        path: PathBuf,
        /// The parse or validation failure.
        #[source]
        source: BoxError,
    },

    /// A cluster could not be serialized into a record.
    #[error("encode cluster {name}: {source}")]
    Encode {
        /// The cluster being written.
        name: String,
        /// The serialization failure.
        #[source]
        source: BoxError,
    },

    /// A record file name is not a valid escaped cluster name.
    #[error("invalid cluster file name: {}", .path.display())]
    InvalidFileName {
        /// The offending record file.
        path: PathBuf,
    },

    /// The operation's context was canceled.
    #[error("operation canceled")]
    Canceled,

    /// The operation's context deadline passed.
    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    /// Neither `XDG_STATE_HOME` nor `HOME` is usable.
    #[error("HOME is not set")]
    HomeNotSet,
}

impl Error {
    /// Returns true for the expected "already exists" / "not found" outcomes.
    #[must_use]
    pub const fn is_conflict_or_missing(&self) -> bool {
        matches!(
            self,
            Self::ClusterAlreadyExists { .. } | Self::ClusterNotFound { .. }
        )
    }

    /// Wraps an I/O failure with the operation and path it happened on.
    pub fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for cluster operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(Error::EmptyClusterName.to_string(), "cluster name is empty");
        assert_eq!(Error::HomeNotSet.to_string(), "HOME is not set");

        let err = Error::ClusterNotFound {
            name: "cluster-a".to_string(),
        };
        assert_eq!(err.to_string(), "cluster not found: cluster-a");

        let err = Error::DuplicateHost {
            host: "10.0.0.1:3300".to_string(),
        };
        assert_eq!(err.to_string(), "cluster host is duplicated: 10.0.0.1:3300");
    }

    #[test]
    fn io_error_names_operation_and_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io("write cluster file", "/tmp/x.json", source);
        assert_eq!(err.to_string(), "write cluster file /tmp/x.json: denied");

        let source = std::error::Error::source(&err).expect("source kept");
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn conflict_or_missing_predicate() {
        assert!(
            Error::ClusterNotFound {
                name: "a".to_string()
            }
            .is_conflict_or_missing()
        );
        assert!(!Error::Canceled.is_conflict_or_missing());
        assert!(
            Error::ClusterAlreadyExists {
                name: "a".to_string()
            }
            .is_conflict_or_missing()
        );
        assert!(!Error::HomeNotSet.is_conflict_or_missing());
    }
}
