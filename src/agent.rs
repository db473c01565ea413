//! Keeping the rekordbox background agent from starting at login.
//!
//! The agent's launch plist is emptied and then flagged user-immutable so
//! rekordbox cannot restore it.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::error::{IoContext, Result, SyncError};
use crate::paths::AGENT_PLIST;
use crate::ui::{self, Prompter, prompts};

pub fn agent_plist(home: &Path) -> PathBuf {
    home.join(AGENT_PLIST)
}

/// Empty the plist, creating it if it does not exist yet.
pub fn truncate_plist(plist: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(plist)
        .at_path("truncate", plist)?;
    info!("Truncated {:?}", plist);
    Ok(())
}

/// Set the user-immutable flag (`chflags uchg`).
pub fn lock_plist(plist: &Path) -> Result<()> {
    let status = Command::new("chflags")
        .arg("uchg")
        .arg(plist)
        .status()
        .at_path("lock", plist)?;

    if !status.success() {
        return Err(SyncError::io_at(
            "lock",
            plist,
            std::io::Error::other(format!("chflags exited with {}", status)),
        ));
    }
    info!("Locked {:?}", plist);
    Ok(())
}

/// Ask, then empty and lock the agent plist under `home`.
pub fn deactivate(home: &Path, prompter: &mut dyn Prompter) -> Result<PathBuf> {
    if !prompter.confirm(prompts::prompt_deactivate_agent(), false)? {
        return Err(SyncError::UserDeclined);
    }

    let plist = agent_plist(home);
    truncate_plist(&plist)?;
    lock_plist(&plist)?;

    ui::success(&format!(
        "Disabled Rekordbox Agent startup ('{}' emptied and locked).",
        plist.display()
    ));
    Ok(plist)
}
