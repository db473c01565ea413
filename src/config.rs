use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cloud::Account;
use crate::error::SyncError;
use crate::migration::ConflictPolicy;
use crate::paths::{self, DEFAULT_LIBRARY_FOLDER, FolderSet};
use crate::platform::{MINIMUM_VERSION, OsVersion};
use crate::ui::{AssumeYes, Interactive, Prompter};

/// Persistent defaults, read from `config.toml`. Every field is optional in
/// the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library_folder: String,
    pub folders: FolderSet,
    pub on_conflict: ConflictPolicy,
    pub account: Account,
    pub minimum_os_version: String,
    pub dropbox_info: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_folder: DEFAULT_LIBRARY_FOLDER.to_string(),
            folders: FolderSet::default(),
            on_conflict: ConflictPolicy::default(),
            account: Account::default(),
            minimum_os_version: MINIMUM_VERSION.to_string(),
            dropbox_info: None,
        }
    }
}

impl Config {
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("rekordbox-sync")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".rekordbox-sync")
        };

        Ok(config_dir)
    }

    /// Create the config directory on demand. Reading config never does.
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = Self::get_config_dir()?;
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }
        Ok(config_dir)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    /// Load from the default location, or from `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::get_config_path()?,
        };
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }
}

/// Values given on the command line; `None` falls back to the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub home: Option<PathBuf>,
    pub dropbox_info: Option<PathBuf>,
    pub library_folder: Option<String>,
    pub folders: Option<FolderSet>,
    pub on_conflict: Option<ConflictPolicy>,
    pub account: Option<Account>,
    pub assume_yes: bool,
    pub skip_version_check: bool,
    pub deactivate_agent: bool,
}

/// The fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub home: PathBuf,
    pub dropbox_info: PathBuf,
    pub library_folder: String,
    pub folders: FolderSet,
    pub on_conflict: ConflictPolicy,
    pub account: Account,
    pub minimum_os_version: OsVersion,
    pub assume_yes: bool,
    pub skip_version_check: bool,
    pub deactivate_agent: bool,
}

impl MigrationConfig {
    /// Layer command-line overrides over the file config and defaults.
    pub fn resolve(file: &Config, overrides: ConfigOverrides) -> Result<Self, SyncError> {
        let home = paths::home_dir(overrides.home.as_deref())?;

        let dropbox_info = overrides
            .dropbox_info
            .or_else(|| file.dropbox_info.clone())
            .unwrap_or_else(|| home.join(paths::DROPBOX_INFO));

        let library_folder = validate_library_folder(
            overrides
                .library_folder
                .as_deref()
                .unwrap_or(&file.library_folder),
        )?;

        let minimum_os_version = file.minimum_os_version.parse::<OsVersion>().map_err(|_| {
            SyncError::Config(format!(
                "minimum_os_version '{}' is not a major.minor version",
                file.minimum_os_version
            ))
        })?;

        Ok(Self {
            home,
            dropbox_info,
            library_folder,
            folders: overrides.folders.unwrap_or(file.folders),
            on_conflict: overrides.on_conflict.unwrap_or(file.on_conflict),
            account: overrides.account.unwrap_or(file.account),
            minimum_os_version,
            assume_yes: overrides.assume_yes,
            skip_version_check: overrides.skip_version_check,
            deactivate_agent: overrides.deactivate_agent,
        })
    }

    /// `--yes` answers every question without a terminal.
    pub fn prompter(&self) -> Box<dyn Prompter> {
        if self.assume_yes {
            Box::new(AssumeYes)
        } else {
            Box::new(Interactive)
        }
    }
}

/// A library folder is a single path component under the cloud root.
pub fn validate_library_folder(name: &str) -> Result<String, SyncError> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(SyncError::Config(format!(
            "library folder '{}' must be a single folder name",
            name
        )));
    }
    Ok(name.to_string())
}
