//! Well-known locations on a macOS rekordbox install

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

pub const DEFAULT_LIBRARY_FOLDER: &str = "RekordboxLibrary";
pub const BACKUP_SUFFIX: &str = "_backup";
pub const AGENT_PLIST: &str = "Library/LaunchAgents/com.pioneerdj.rekordboxdj.agent.plist";
pub const DROPBOX_INFO: &str = ".dropbox/info.json";

/// Resolve the current user's home directory, honouring an explicit override.
pub fn home_dir(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }
    dirs::home_dir().ok_or_else(|| SyncError::precondition("Couldn't determine the user home directory."))
}

/// One folder the tool manages: where it lives under home, and where it
/// lands under the library target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryFolder {
    pub label: &'static str,
    source: &'static [&'static str],
    destination: &'static [&'static str],
}

pub const PIONEER_LIBRARY: LibraryFolder = LibraryFolder {
    label: "Pioneer library",
    source: &["Library", "Pioneer"],
    destination: &["Pioneer"],
};

pub const PIONEER_APP_SUPPORT: LibraryFolder = LibraryFolder {
    label: "Pioneer application support",
    source: &["Library", "Application Support", "Pioneer"],
    destination: &["Application Support", "Pioneer"],
};

pub const AGENT_APP_SUPPORT: LibraryFolder = LibraryFolder {
    label: "rekordboxAgent application support",
    source: &["Library", "Application Support", "rekordboxAgent"],
    destination: &["Application Support", "rekordboxAgent"],
};

impl LibraryFolder {
    pub fn source_in(&self, home: &Path) -> PathBuf {
        join_all(home, self.source)
    }

    pub fn destination_in(&self, library_target: &Path) -> PathBuf {
        join_all(library_target, self.destination)
    }

    /// Directory the source is moved into so that it ends up at `destination_in`.
    pub fn destination_parent_in(&self, library_target: &Path) -> PathBuf {
        join_all(library_target, &self.destination[..self.destination.len() - 1])
    }

    pub fn backup_in(&self, home: &Path) -> PathBuf {
        backup_path(&self.source_in(home))
    }
}

const PIONEER_ONLY: &[LibraryFolder] = &[PIONEER_LIBRARY];
const FULL_LIBRARY: &[LibraryFolder] = &[PIONEER_LIBRARY, PIONEER_APP_SUPPORT, AGENT_APP_SUPPORT];

fn join_all(base: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(base.to_path_buf(), |acc, part| acc.join(part))
}

/// `<path>_backup`, next to the original.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Which folders a migration covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FolderSet {
    /// Only ~/Library/Pioneer
    #[default]
    Pioneer,
    /// ~/Library/Pioneer plus both Application Support folders
    Full,
}

impl FolderSet {
    pub fn folders(&self) -> &'static [LibraryFolder] {
        match self {
            FolderSet::Pioneer => PIONEER_ONLY,
            FolderSet::Full => FULL_LIBRARY,
        }
    }
}
