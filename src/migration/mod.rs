//! Moving the local library into the cloud folder and linking it back.

pub mod fs_ops;

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{IoContext, Result, SyncError};
use crate::paths::LibraryFolder;
use crate::ui::{self, Prompter, prompts};

pub use fs_ops::{StepOutcome, backup_folder, link_folder, move_folder};

/// What to do when the library target already holds the folders being migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Ask, then back up the local folders and link to the cloud copy
    #[default]
    Backup,
    /// Refuse to touch anything
    Abort,
}

/// Which branch the executor took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationMode {
    /// Nothing in the target yet; local folders were moved there.
    Fresh,
    /// The target already had the library; local folders were backed up.
    Overwrite,
}

/// Every step a migration performed, in order.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub mode: MigrationMode,
    pub steps: Vec<StepOutcome>,
}

impl MigrationReport {
    fn new(mode: MigrationMode) -> Self {
        Self {
            mode,
            steps: Vec::new(),
        }
    }

    fn record(&mut self, outcome: StepOutcome) {
        outcome.print();
        self.steps.push(outcome);
    }

    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(StepOutcome::is_failure)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| s.is_failure())
    }

    pub fn linked(&self) -> impl Iterator<Item = &Path> {
        self.steps.iter().filter_map(|s| match s {
            StepOutcome::Linked { link, .. } => Some(link.as_path()),
            _ => None,
        })
    }
}

/// Everything the executor needs to know about one run.
#[derive(Debug, Clone)]
pub struct MigrationPlan {
    pub home: PathBuf,
    pub library_target: PathBuf,
    pub folders: &'static [LibraryFolder],
    pub on_conflict: ConflictPolicy,
}

/// Check that every managed source folder exists under `home`.
///
/// Absence is `Ok(false)`; only an inability to tell is an error.
pub fn verify_sources(home: &Path, folders: &[LibraryFolder]) -> Result<bool> {
    let mut all_present = true;

    for folder in folders {
        let source = folder.source_in(home);
        let present = source.try_exists().at_path("inspect", &source)?;
        if !present {
            warn!("Missing source folder {:?}", source);
            ui::failure(&format!(
                "Couldn't locate local {} at '{}'.",
                folder.label,
                source.display()
            ));
            all_present = false;
        }
    }

    if all_present {
        ui::success("Identified local Rekordbox Library files.");
    }
    Ok(all_present)
}

/// Destinations under the library target that already exist.
pub fn find_conflicts(library_target: &Path, folders: &[LibraryFolder]) -> Vec<PathBuf> {
    folders
        .iter()
        .map(|f| f.destination_in(library_target))
        .filter(|p| fs::symlink_metadata(p).is_ok())
        .collect()
}

/// Run the migration. Individual step failures are recorded in the
/// report; only a refused or declined overwrite is an error.
pub fn execute(plan: &MigrationPlan, prompter: &mut dyn Prompter) -> Result<MigrationReport> {
    let conflicts = find_conflicts(&plan.library_target, plan.folders);

    let report = if conflicts.is_empty() {
        migrate_fresh(plan)
    } else {
        info!("Existing library files in target: {:?}", conflicts);
        match plan.on_conflict {
            ConflictPolicy::Abort => {
                return Err(SyncError::precondition(format!(
                    "Found existing Rekordbox Library files in '{}'. Aborting.",
                    plan.library_target.display()
                )));
            }
            ConflictPolicy::Backup => {
                let question = prompts::prompt_overwrite_local(&plan.library_target.display().to_string());
                if !prompter.confirm(&question, false)? {
                    return Err(SyncError::UserDeclined);
                }
                migrate_overwrite(plan)
            }
        }
    };

    if report.has_failures() {
        ui::failure("Migration finished with errors; see the messages above.");
    } else {
        ui::success("Successfully migrated Pioneer Rekordbox Library to Dropbox cloud.");
    }
    Ok(report)
}

fn migrate_fresh(plan: &MigrationPlan) -> MigrationReport {
    let mut report = MigrationReport::new(MigrationMode::Fresh);

    for folder in plan.folders {
        report.record(move_folder(
            &folder.source_in(&plan.home),
            &folder.destination_parent_in(&plan.library_target),
        ));
    }
    for folder in plan.folders {
        report.record(link_back(plan, folder));
    }

    report
}

fn migrate_overwrite(plan: &MigrationPlan) -> MigrationReport {
    let mut report = MigrationReport::new(MigrationMode::Overwrite);

    for folder in plan.folders {
        let source = folder.source_in(&plan.home);
        let destination = folder.destination_in(&plan.library_target);

        // A folder the cloud copy lacks is moved rather than backed up, so
        // its link never dangles.
        if fs::symlink_metadata(&destination).is_ok() {
            report.record(backup_folder(&source));
        } else {
            report.record(move_folder(&source, &folder.destination_parent_in(&plan.library_target)));
        }
    }
    for folder in plan.folders {
        report.record(link_back(plan, folder));
    }

    report
}

/// Link the original location to its destination, unless there is nothing
/// to point at.
fn link_back(plan: &MigrationPlan, folder: &LibraryFolder) -> StepOutcome {
    let destination = folder.destination_in(&plan.library_target);
    let source = folder.source_in(&plan.home);

    if fs::symlink_metadata(&destination).is_err() {
        warn!("Not linking {:?}: {:?} is missing", source, destination);
        return StepOutcome::Skipped {
            path: source,
            reason: "Nothing to link to".to_string(),
        };
    }
    link_folder(&destination, &source)
}
