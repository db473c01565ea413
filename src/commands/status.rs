//! Read-only report of where the library currently lives

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use colored::*;

use crate::cloud;
use crate::config::MigrationConfig;
use crate::error::Result;
use crate::paths::LibraryFolder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderState {
    Missing,
    LocalDirectory,
    /// A symlink; `into_library` is set when it points at the expected destination.
    Linked { target: PathBuf, into_library: bool },
    Other,
}

impl fmt::Display for FolderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderState::Missing => write!(f, "missing"),
            FolderState::LocalDirectory => write!(f, "local directory"),
            FolderState::Linked { target, into_library } => {
                write!(f, "linked -> {}", target.display())?;
                if *into_library {
                    write!(f, " (library)")?;
                }
                Ok(())
            }
            FolderState::Other => write!(f, "other"),
        }
    }
}

/// Classify `source` without following it.
pub fn inspect(source: &Path, expected_destination: Option<&Path>) -> FolderState {
    let Ok(meta) = fs::symlink_metadata(source) else {
        return FolderState::Missing;
    };

    if meta.file_type().is_symlink() {
        let target = fs::read_link(source).unwrap_or_default();
        let into_library = expected_destination.is_some_and(|d| target == d);
        FolderState::Linked { target, into_library }
    } else if meta.is_dir() {
        FolderState::LocalDirectory
    } else {
        FolderState::Other
    }
}

/// Snapshot of every managed folder.
pub fn collect(config: &MigrationConfig) -> (Result<PathBuf>, Vec<(LibraryFolder, PathBuf, FolderState)>) {
    let root = cloud::locate_root(&config.dropbox_info, config.account);
    let target = root.as_ref().ok().map(|r| r.join(&config.library_folder));

    let folders = config
        .folders
        .folders()
        .iter()
        .map(|folder| {
            let source = folder.source_in(&config.home);
            let expected = target.as_ref().map(|t| folder.destination_in(t));
            let state = inspect(&source, expected.as_deref());
            (*folder, source, state)
        })
        .collect();

    (root, folders)
}

pub fn status_command(config: &MigrationConfig) -> Result<()> {
    let (root, folders) = collect(config);

    println!("{}", "rekordbox-sync status".bright_blue().bold());
    println!("  {} {}", "Home:".dimmed(), config.home.display());
    match &root {
        Ok(root) => {
            println!("  {} {}", "Dropbox:".dimmed(), root.display());
            println!(
                "  {} {}",
                "Library:".dimmed(),
                root.join(&config.library_folder).display()
            );
        }
        Err(e) => println!("  {} {}", "Dropbox:".dimmed(), e.to_string().red()),
    }
    println!();

    for (folder, source, state) in &folders {
        let state_text = match state {
            FolderState::Linked { into_library: true, .. } => state.to_string().green(),
            FolderState::Linked { .. } | FolderState::Other => state.to_string().yellow(),
            FolderState::LocalDirectory => state.to_string().normal(),
            FolderState::Missing => state.to_string().red(),
        };
        println!("  {} ({})", folder.label.bold(), source.display());
        println!("    {}", state_text);
    }

    Ok(())
}
