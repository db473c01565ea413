//! macOS version gate

use std::fmt;
use std::process::Command;
use std::str::FromStr;

use log::{debug, info};

use crate::error::{Result, SyncError};

pub const MINIMUM_VERSION: OsVersion = OsVersion { major: 13, minor: 0 };

/// A `major.minor` product version. Patch levels are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl FromStr for OsVersion {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('.');

        let parse = |part: Option<&str>| -> Result<Option<u32>> {
            match part {
                None => Ok(None),
                Some(p) => p
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|_| SyncError::precondition(format!("Unrecognised macOS version '{}'.", trimmed))),
            }
        };

        let major = parse(parts.next().filter(|p| !p.is_empty()))?
            .ok_or_else(|| SyncError::precondition(format!("Unrecognised macOS version '{}'.", trimmed)))?;
        let minor = parse(parts.next())?.unwrap_or(0);

        Ok(OsVersion { major, minor })
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Compare a raw version string against the minimum.
pub fn check_version(current: &str, minimum: OsVersion) -> Result<OsVersion> {
    let version: OsVersion = current.parse()?;
    if version < minimum {
        return Err(SyncError::precondition(format!(
            "Running unsupported macOS version {}. Aborting.",
            current.trim()
        )));
    }
    Ok(version)
}

/// Ask the OS for its product version.
pub fn current_version() -> Result<String> {
    if !cfg!(target_os = "macos") {
        return Err(SyncError::precondition(format!(
            "Unsupported operating system '{}'. This tool only runs on macOS.",
            std::env::consts::OS
        )));
    }

    let output = Command::new("sw_vers")
        .arg("-productVersion")
        .output()
        .map_err(|e| SyncError::io("Failed to run sw_vers", e))?;

    if !output.status.success() {
        return Err(SyncError::precondition("Couldn't read the macOS version."));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!("sw_vers reported {}", version);
    Ok(version)
}

/// Fail unless this host runs a supported macOS release.
pub fn ensure_supported(minimum: OsVersion) -> Result<String> {
    let current = current_version()?;
    check_version(&current, minimum)?;
    info!("macOS {} satisfies minimum {}", current, minimum);
    Ok(current)
}
