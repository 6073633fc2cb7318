//! Validated, normalized host endpoints.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};

/// Port appended to endpoints that do not name one.
pub const DEFAULT_PORT: u16 = 3300;

/// A non-empty, duplicate-free list of `host:port` endpoints.
///
/// Entries keep the order they were supplied in. An entry without a `:` gets
/// [`DEFAULT_PORT`] appended; anything containing a `:` is kept verbatim, so
/// neither the host part nor an explicit port is syntax-checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hosts {
    values: Vec<String>,
}

impl Hosts {
    /// Validates and normalizes raw endpoints.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptyHosts`] when `raw` yields nothing.
    /// * [`Error::EmptyHost`] when an entry is blank after trimming.
    /// * [`Error::DuplicateHost`] when an entry normalizes to an endpoint
    ///   already seen earlier in `raw`.
    pub fn new<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw = raw.into_iter();
        let mut values = Vec::with_capacity(raw.size_hint().0);
        let mut seen = HashSet::with_capacity(raw.size_hint().0);

        for host in raw {
            let host = host.as_ref();
            if host.trim().is_empty() {
                return Err(Error::EmptyHost);
            }

            let normalized = normalize(host);
            if !seen.insert(normalized.clone()) {
                return Err(Error::DuplicateHost { host: normalized });
            }
            values.push(normalized);
        }

        if values.is_empty() {
            return Err(Error::EmptyHosts);
        }

        Ok(Self { values })
    }

    /// Returns an owned copy of the endpoints.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.values.clone()
    }

}

impl fmt::Display for Hosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values.join(","))
    }
}

fn normalize(host: &str) -> String {
    if host.contains(':') {
        host.to_string()
    } else {
        format!("{host}:{DEFAULT_PORT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn empty_input_is_rejected() {
        let result = Hosts::new(Vec::<String>::new());
        assert!(matches!(result, Err(Error::EmptyHosts)));
    }

    #[test]
    fn default_port_is_appended() {
        let hosts = Hosts::new(["10.0.0.1", "10.0.0.2:4400"]).expect("valid hosts");
        assert_eq!(hosts.values(), vec!["10.0.0.1:3300", "10.0.0.2:4400"]);
    }

    #[test_case(&["", "10.0.0.1"] ; "empty first")]
    #[test_case(&["10.0.0.1", "   "] ; "blank later")]
    #[test_case(&["\t"] ; "only whitespace")]
    fn blank_entry_is_rejected(input: &[&str]) {
        assert!(matches!(Hosts::new(input), Err(Error::EmptyHost)));
    }

    #[test_case(&["10.0.0.1", "10.0.0.1:3300"] ; "collision after normalization")]
    #[test_case(&["mon-a:6789", "mon-a:6789"] ; "identical explicit ports")]
    #[test_case(&["mon-a", "mon-b", "mon-a"] ; "non adjacent")]
    fn duplicate_entry_is_rejected(input: &[&str]) {
        assert!(matches!(Hosts::new(input), Err(Error::DuplicateHost { .. })));
    }

    #[test]
    fn duplicate_reports_normalized_host() {
        match Hosts::new(["10.0.0.1", "10.0.0.1:3300"]) {
            Err(Error::DuplicateHost { host }) => assert_eq!(host, "10.0.0.1:3300"),
            other => panic!("expected duplicate host, got {other:?}"),
        }
    }

    #[test]
    fn first_failure_wins() {
        // The blank entry comes before the duplicate.
        let result = Hosts::new(["a", "", "a"]);
        assert!(matches!(result, Err(Error::EmptyHost)));
    }

    #[test]
    fn explicit_port_is_not_validated() {
        let hosts = Hosts::new(["mon-a:not-a-port", "[::1]"]).expect("permissive");
        assert_eq!(hosts.values(), vec!["mon-a:not-a-port", "[::1]"]);
    }

    #[test]
    fn values_returns_copy() {
        let hosts = Hosts::new(["10.0.0.1"]).expect("valid hosts");

        let mut values = hosts.values();
        values[0] = "changed:3300".to_string();

        assert_eq!(hosts.values(), vec!["10.0.0.1:3300"]);
    }

    #[test]
    fn display_joins_with_commas() {
        let hosts = Hosts::new(["a", "b:1"]).expect("valid hosts");
        assert_eq!(hosts.to_string(), "a:3300,b:1");
    }

    proptest! {
        #[test]
        fn normalization_keeps_order(names in proptest::collection::hash_set("[a-z][a-z0-9.-]{0,12}", 1..8)) {
            let input: Vec<String> = names.into_iter().collect();
            let hosts = Hosts::new(&input).expect("distinct names are valid");

            let values = hosts.values();
            prop_assert_eq!(values.len(), input.len());
            for (raw, normalized) in input.iter().zip(values.iter()) {
                prop_assert_eq!(normalized, &format!("{raw}:3300"));
            }
        }
    }
}
