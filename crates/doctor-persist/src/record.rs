//! On-disk record format and file naming.

use std::path::Path;

use doctor_core::{Cluster, Error, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Extension of every record file.
pub const RECORD_EXTENSION: &str = "json";

/// Bytes escaped in a URL path segment: everything except the unreserved set
/// and the sub-delimiters that are legal inside a segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// JSON shape of a stored cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    /// Cluster name. Authoritative over the file name.
    pub name: String,
    /// Access key.
    pub key: String,
    /// Normalized endpoints.
    pub hosts: Vec<String>,
}

impl From<&Cluster> for ClusterRecord {
    fn from(cluster: &Cluster) -> Self {
        Self {
            name: cluster.name().to_string(),
            key: cluster.key().to_string(),
            hosts: cluster.hosts().values(),
        }
    }
}

impl ClusterRecord {
    /// Serializes the record for writing.
    ///
    /// # Errors
    ///
    /// [`Error::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Encode {
            name: self.name.clone(),
            source: Box::new(e),
        })
    }

    /// Parses a record and re-validates it as a [`Cluster`].
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] naming `path` if the bytes are not a valid record.
    pub fn decode(path: &Path, bytes: &[u8]) -> Result<Cluster> {
        let record: Self = serde_json::from_slice(bytes).map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        Cluster::new(record.name, record.key, record.hosts).map_err(|e| Error::Decode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

/// File name for a cluster: the escaped name plus `.json`.
#[must_use]
pub fn file_name(cluster_name: &str) -> String {
    format!(
        "{}.{RECORD_EXTENSION}",
        utf8_percent_encode(cluster_name, PATH_SEGMENT)
    )
}

/// Recovers the cluster name from a record file name.
///
/// Returns `None` for names without the record extension.
///
/// # Errors
///
/// [`Error::InvalidFileName`] if the stem does not unescape to UTF-8.
pub fn cluster_name(path: &Path) -> Result<Option<String>> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Err(Error::InvalidFileName {
            path: path.to_path_buf(),
        });
    };
    let Some(stem) = file_name.strip_suffix(&format!(".{RECORD_EXTENSION}")) else {
        return Ok(None);
    };

    if !has_valid_escapes(stem) {
        return Err(Error::InvalidFileName {
            path: path.to_path_buf(),
        });
    }

    percent_decode_str(stem)
        .decode_utf8()
        .map(|name| Some(name.into_owned()))
        .map_err(|_| Error::InvalidFileName {
            path: path.to_path_buf(),
        })
}

// Every `%` must start a two-digit hex escape.
fn has_valid_escapes(stem: &str) -> bool {
    stem.split('%').skip(1).all(|chunk| {
        chunk
            .as_bytes()
            .get(..2)
            .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_case::test_case;

    #[test_case("cluster-a", "cluster-a.json" ; "plain")]
    #[test_case("prod/primary cluster", "prod%2Fprimary%20cluster.json" ; "slash and space")]
    #[test_case("프로덕션", "%ED%94%84%EB%A1%9C%EB%8D%95%EC%85%98.json" ; "non ascii")]
    #[test_case("a:b@c$d&e+f=g~h", "a:b@c$d&e+f=g~h.json" ; "segment safe punctuation")]
    #[test_case("50%;x,y?", "50%25%3Bx%2Cy%3F.json" ; "escaped punctuation")]
    #[test_case("..", "...json" ; "dot dot")]
    fn file_name_escapes_like_a_path_segment(name: &str, expected: &str) {
        assert_eq!(file_name(name), expected);
    }

    #[test]
    fn file_name_round_trips() {
        let name = "프로덕션/primary cluster";
        let path = PathBuf::from("/root/clusters").join(file_name(name));

        assert!(!file_name(name).contains('/'));
        assert_eq!(cluster_name(&path).expect("valid"), Some(name.to_string()));
    }

    #[test]
    fn non_record_files_are_skipped() {
        let path = PathBuf::from("/root/clusters/.cluster-a.json.tmp");
        assert_eq!(cluster_name(&path).expect("valid"), None);
    }

    #[test_case("bad%zz.json" ; "non hex digits")]
    #[test_case("bad%4.json" ; "truncated escape")]
    #[test_case("bad%.json" ; "trailing percent")]
    #[test_case("%%41.json" ; "double percent")]
    fn malformed_escape_is_rejected(file: &str) {
        let path = PathBuf::from("/root/clusters").join(file);
        assert!(matches!(
            cluster_name(&path),
            Err(Error::InvalidFileName { .. })
        ));
    }

    #[test]
    fn lowercase_hex_escape_is_accepted() {
        let path = PathBuf::from("/root/clusters/a%2fb.json");
        assert_eq!(cluster_name(&path).expect("valid"), Some("a/b".to_string()));
    }

    #[test]
    fn invalid_utf8_escape_is_rejected() {
        let path = PathBuf::from("/root/clusters/%FF.json");
        assert!(matches!(
            cluster_name(&path),
            Err(Error::InvalidFileName { .. })
        ));
    }

    #[test]
    fn record_json_shape() {
        let cluster = Cluster::new("cluster-a", "secret", ["10.0.0.1"]).expect("valid");
        let bytes = ClusterRecord::from(&cluster).encode().expect("encode");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");

        assert_eq!(
            value,
            serde_json::json!({
                "name": "cluster-a",
                "key": "secret",
                "hosts": ["10.0.0.1:3300"],
            })
        );
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let path = PathBuf::from("/root/clusters/broken.json");
        match ClusterRecord::decode(&path, b"{invalid") {
            Err(Error::Decode { path: bad, .. }) => assert_eq!(bad, path),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_invalid_cluster() {
        let path = PathBuf::from("/root/clusters/empty-key.json");
        let bytes = br#"{"name":"a","key":"","hosts":["10.0.0.1"]}"#;
        match ClusterRecord::decode(&path, bytes) {
            Err(Error::Decode { source, .. }) => {
                assert_eq!(source.to_string(), "cluster key is empty");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
