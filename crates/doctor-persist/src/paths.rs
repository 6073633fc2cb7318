//! Default state directory resolution.

use std::path::PathBuf;

use doctor_core::{Error, Result};

/// Directory name used under the state home.
pub const APP_DIR_NAME: &str = "ceph-doctor";

/// Resolves the default root from the process environment.
///
/// # Errors
///
/// [`Error::HomeNotSet`] when neither `XDG_STATE_HOME` nor `HOME` is set to a
/// non-blank value.
pub fn default_root_dir() -> Result<PathBuf> {
    resolve_root_dir(|name| std::env::var_os(name).map(|v| v.to_string_lossy().into_owned()))
}

/// Resolves the default root using `lookup` for environment variables.
///
/// `$XDG_STATE_HOME/ceph-doctor` wins, then `$HOME/.local/state/ceph-doctor`.
/// Blank values count as unset. Nothing is created on disk.
///
/// # Errors
///
/// [`Error::HomeNotSet`] when neither variable is usable.
pub fn resolve_root_dir<F>(lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let usable = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(state_home) = usable("XDG_STATE_HOME") {
        return Ok(PathBuf::from(state_home).join(APP_DIR_NAME));
    }

    let home = usable("HOME").ok_or(Error::HomeNotSet)?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("state")
        .join(APP_DIR_NAME))
}
