//! Move, link and backup primitives. None of these abort a run; each
//! returns the outcome of its single step.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::paths::backup_path;
use crate::ui;

/// Result of one filesystem step in a migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { from: PathBuf, to: PathBuf },
    Linked { link: PathBuf, target: PathBuf },
    BackedUp { from: PathBuf, to: PathBuf },
    Skipped { path: PathBuf, reason: String },
    Failed { path: PathBuf, error: String },
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }

    /// Print the outcome as a colored status line.
    pub fn print(&self) {
        let line = self.to_string();
        match self {
            StepOutcome::Failed { .. } => ui::failure(&line),
            StepOutcome::Skipped { .. } => ui::warning(&line),
            _ => ui::success(&line),
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Moved { from, to } => {
                write!(f, "Successfully moved '{}' to '{}'.", from.display(), to.display())
            }
            StepOutcome::Linked { link, target } => write!(
                f,
                "Successfully created symbolic link from {} to {}.",
                target.display(),
                link.display()
            ),
            StepOutcome::BackedUp { from, to } => {
                write!(f, "Backed up '{}' to '{}'.", from.display(), to.display())
            }
            StepOutcome::Skipped { path, reason } => {
                write!(f, "{} at {}. Skipping.", reason, path.display())
            }
            StepOutcome::Failed { path, error } => {
                write!(f, "Error processing '{}': {}.", path.display(), error)
            }
        }
    }
}

fn exists_no_follow(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Move `src` into `dest_dir`, keeping its name.
///
/// Tries a rename first and falls back to copy-then-delete when the two
/// paths sit on different filesystems.
pub fn move_folder(src: &Path, dest_dir: &Path) -> StepOutcome {
    let Some(name) = src.file_name() else {
        return StepOutcome::Failed {
            path: src.to_path_buf(),
            error: "source has no folder name".to_string(),
        };
    };
    let dest = dest_dir.join(name);

    let result = if !exists_no_follow(src) {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("'{}' does not exist", src.display()),
        ))
    } else if exists_no_follow(&dest) {
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", dest.display()),
        ))
    } else {
        fs::create_dir_all(dest_dir).and_then(|_| rename_or_copy(src, &dest))
    };

    match result {
        Ok(()) => {
            info!("Moved {:?} to {:?}", src, dest);
            StepOutcome::Moved {
                from: src.to_path_buf(),
                to: dest,
            }
        }
        Err(e) => {
            error!("Failed to move {:?} to {:?}: {}", src, dest, e);
            StepOutcome::Failed {
                path: src.to_path_buf(),
                error: e.to_string(),
            }
        }
    }
}

fn rename_or_copy(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            warn!("Rename {:?} crosses devices, falling back to copy+remove", src);
            if let Err(copy_err) = copy_tree(src, dest) {
                // leave the source intact; drop the partial copy
                let _ = fs::remove_dir_all(dest);
                return Err(copy_err);
            }
            fs::remove_dir_all(src)
        }
        Err(e) => Err(e),
    }
}

/// Recursively copy a directory, recreating nested symlinks as links.
pub fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dest.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            let link_src = fs::read_link(entry.path())?;
            create_symlink(&link_src, &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    debug!("Copied tree {:?} -> {:?}", src, dest);
    Ok(())
}

/// Create a directory symlink at `link` pointing to `target`.
///
/// An existing entry at `link` is left alone and reported as skipped.
pub fn link_folder(target: &Path, link: &Path) -> StepOutcome {
    if exists_no_follow(link) {
        warn!("Link path {:?} already exists", link);
        return StepOutcome::Skipped {
            path: link.to_path_buf(),
            reason: "Link already exists".to_string(),
        };
    }

    match create_symlink(target, link) {
        Ok(()) => {
            info!("Linked {:?} -> {:?}", link, target);
            StepOutcome::Linked {
                link: link.to_path_buf(),
                target: target.to_path_buf(),
            }
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => StepOutcome::Skipped {
            path: link.to_path_buf(),
            reason: "Link already exists".to_string(),
        },
        Err(e) => {
            error!("Failed to link {:?} -> {:?}: {}", link, target, e);
            StepOutcome::Failed {
                path: link.to_path_buf(),
                error: format!(
                    "failed to create symbolic link from {} to {}: {}",
                    target.display(),
                    link.display(),
                    e
                ),
            }
        }
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

/// Rename `src` to `<src>_backup`. Never replaces an earlier backup.
pub fn backup_folder(src: &Path) -> StepOutcome {
    let backup = backup_path(src);

    if !exists_no_follow(src) {
        return StepOutcome::Skipped {
            path: src.to_path_buf(),
            reason: "Nothing to back up".to_string(),
        };
    }

    if exists_no_follow(&backup) {
        warn!("Backup {:?} already exists", backup);
        return StepOutcome::Failed {
            path: src.to_path_buf(),
            error: format!("backup '{}' already exists", backup.display()),
        };
    }

    match fs::rename(src, &backup) {
        Ok(()) => {
            info!("Renamed {:?} to {:?}", src, backup);
            StepOutcome::BackedUp {
                from: src.to_path_buf(),
                to: backup,
            }
        }
        Err(e) => {
            error!("Failed to back up {:?}: {}", src, e);
            StepOutcome::Failed {
                path: src.to_path_buf(),
                error: e.to_string(),
            }
        }
    }
}
