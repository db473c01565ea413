//! Locating the Dropbox sync root from the client's `info.json`

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

/// Which Dropbox account's folder to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Account {
    #[default]
    Personal,
    Business,
}

impl Account {
    fn key(&self) -> &'static str {
        match self {
            Account::Personal => "personal",
            Account::Business => "business",
        }
    }
}

#[derive(Debug, Deserialize)]
struct DropboxInfo {
    personal: Option<AccountInfo>,
    business: Option<AccountInfo>,
}

#[derive(Debug, Deserialize)]
struct AccountInfo {
    path: Option<PathBuf>,
}

/// Parse `info.json` contents and return the configured root for `account`.
pub fn parse_info(contents: &str, account: Account) -> Result<PathBuf> {
    let info: DropboxInfo = serde_json::from_str(contents).map_err(|e| {
        SyncError::precondition(format!(
            "Couldn't locate Dropbox folder or read info.json ({}). Exiting.",
            e
        ))
    })?;

    let entry = match account {
        Account::Personal => info.personal,
        Account::Business => info.business,
    };

    entry.and_then(|a| a.path).ok_or_else(|| {
        SyncError::precondition(format!(
            "info.json has no {} Dropbox path. Exiting.",
            account.key()
        ))
    })
}

/// Read the metadata file and validate that the root it names is a directory.
pub fn locate_root(info_path: &Path, account: Account) -> Result<PathBuf> {
    debug!("Reading Dropbox metadata from {:?}", info_path);

    let contents = fs::read_to_string(info_path).map_err(|e| {
        SyncError::precondition(format!(
            "Couldn't locate Dropbox folder or read {} ({}). Exiting.",
            info_path.display(),
            e
        ))
    })?;

    let root = parse_info(&contents, account)?;

    if !root.is_dir() {
        return Err(SyncError::precondition(format!(
            "Dropbox path '{}' does not exist or is not a folder. Exiting.",
            root.display()
        )));
    }

    info!("Using {} Dropbox root {:?}", account.key(), root);
    Ok(root)
}
