//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use doctor_core::Cluster;
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Cluster information for listing. Never carries the key.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterInfo {
    /// Cluster name.
    pub name: String,
    /// Normalized host endpoints.
    pub hosts: Vec<String>,
}

impl From<&Cluster> for ClusterInfo {
    fn from(cluster: &Cluster) -> Self {
        Self {
            name: cluster.name().to_string(),
            hosts: cluster.hosts().values(),
        }
    }
}

/// List of clusters for display.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterList {
    /// Registered clusters, sorted by name.
    pub clusters: Vec<ClusterInfo>,
}

impl From<&[Cluster]> for ClusterList {
    fn from(clusters: &[Cluster]) -> Self {
        Self {
            clusters: clusters.iter().map(ClusterInfo::from).collect(),
        }
    }
}

impl TableDisplay for ClusterList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.clusters.is_empty() {
            writeln!(writer, "No clusters registered")?;
            return Ok(());
        }

        let rows: Vec<(&str, String)> = self
            .clusters
            .iter()
            .map(|c| (c.name.as_str(), c.hosts.join(",")))
            .collect();
        let name_width = column_width("NAME", rows.iter().map(|(name, _)| *name));
        let hosts_width = column_width("HOSTS", rows.iter().map(|(_, hosts)| hosts.as_str()));

        writeln!(writer, "{:<name_width$}  HOSTS", "NAME")?;
        writeln!(writer, "{}", "─".repeat(name_width + 2 + hosts_width))?;

        for (name, hosts) in &rows {
            writeln!(writer, "{name:<name_width$}  {hosts}")?;
        }

        writeln!(writer)?;
        writeln!(writer, "Total: {} cluster(s)", self.clusters.len())?;
        Ok(())
    }
}

/// Detailed cluster information with the key masked.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterDetail {
    /// Cluster name.
    pub name: String,
    /// Normalized host endpoints.
    pub hosts: Vec<String>,
    /// Masked key.
    pub key_masked: String,
}

impl From<&Cluster> for ClusterDetail {
    fn from(cluster: &Cluster) -> Self {
        Self {
            name: cluster.name().to_string(),
            hosts: cluster.hosts().values(),
            key_masked: "********".into(),
        }
    }
}

impl TableDisplay for ClusterDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Cluster: {}", self.name)?;
        writeln!(writer, "══════════════════════════════════")?;
        writeln!(writer)?;
        writeln!(writer, "Key:      {}", self.key_masked)?;
        writeln!(writer, "Hosts:")?;
        for host in &self.hosts {
            writeln!(writer, "  • {host}")?;
        }
        Ok(())
    }
}

/// Simple message output.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message text.
    pub message: String,
    /// Whether this is a success message.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
}

impl Message {
    /// Create a success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.success {
            writeln!(writer, "✓ {}", self.message)?;
        } else {
            writeln!(writer, "{}", self.message)?;
        }
        Ok(())
    }
}

/// Width of a column in characters, at least as wide as its header.
fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .fold(header.len(), usize::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(name: &str, hosts: &[&str]) -> Cluster {
        Cluster::new(name, "AQBvaBFZ", hosts).expect("valid cluster")
    }

    #[test]
    fn output_format_default_is_table() {
        let output = OutputFormat::default()
            .to_string(&Message::success("done"))
            .expect("should format");
        assert_eq!(output, "✓ done\n");
    }

    #[test]
    fn cluster_list_table_output() {
        let clusters = [
            cluster("alpha", &["10.0.0.1", "10.0.0.2:6789"]),
            cluster("zeta-long-name", &["10.0.0.3"]),
        ];
        let list = ClusterList::from(&clusters[..]);

        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.to_string(&list).expect("should format");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "NAME            HOSTS");
        assert_eq!(lines[2], "alpha           10.0.0.1:3300,10.0.0.2:6789");
        assert_eq!(lines[3], "zeta-long-name  10.0.0.3:3300");
        assert!(output.contains("Total: 2 cluster(s)"));
        assert!(!output.contains("AQBvaBFZ"));
    }

    #[test]
    fn cluster_list_pads_non_ascii_by_chars() {
        let clusters = [cluster("프로덕션", &["a"]), cluster("db", &["b"])];
        let list = ClusterList::from(&clusters[..]);

        let output = OutputFormat::new(Format::Table)
            .to_string(&list)
            .expect("should format");

        assert!(output.contains("프로덕션  a:3300"));
        assert!(output.contains("db    b:3300"));
    }

    #[test]
    fn cluster_list_empty() {
        let list = ClusterList { clusters: vec![] };
        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.to_string(&list).expect("should format");

        assert!(output.contains("No clusters registered"));
    }

    #[test]
    fn cluster_list_json_output() {
        let clusters = [cluster("alpha", &["10.0.0.1"])];
        let list = ClusterList::from(&clusters[..]);

        let fmt = OutputFormat::new(Format::Json);
        let output = fmt.to_string(&list).expect("should format");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(parsed["clusters"][0]["name"], "alpha");
        assert_eq!(parsed["clusters"][0]["hosts"][0], "10.0.0.1:3300");
        assert!(parsed["clusters"][0].get("key").is_none());
    }

    #[test]
    fn cluster_detail_masks_key() {
        let detail = ClusterDetail::from(&cluster("alpha", &["10.0.0.1", "10.0.0.2"]));

        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.to_string(&detail).expect("should format");

        assert!(output.contains("Cluster: alpha"));
        assert!(output.contains("********"));
        assert!(output.contains("• 10.0.0.2:3300"));
        assert!(!output.contains("AQBvaBFZ"));
    }

    #[test]
    fn message_success() {
        let msg = Message::success("Cluster 'alpha' registered");
        let fmt = OutputFormat::new(Format::Table);
        let output = fmt.to_string(&msg).expect("should format");

        assert!(output.contains("✓ Cluster 'alpha' registered"));
    }

    #[test]
    fn message_json_output() {
        let msg = Message::success("done");
        let output = OutputFormat::new(Format::Json)
            .to_string(&msg)
            .expect("should format");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(parsed["message"], "done");
        assert_eq!(parsed["success"], true);
    }
}
