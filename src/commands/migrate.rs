use std::fs;

use log::info;

use crate::agent;
use crate::cloud;
use crate::config::{MigrationConfig, validate_library_folder};
use crate::error::{IoContext, Result, SyncError};
use crate::migration::{self, MigrationPlan, MigrationReport};
use crate::platform;
use crate::ui::{self, Prompter, prompts};

/// Run the whole migration flow.
///
/// Returns `Ok(None)` when the local library could not be found, which is a
/// graceful no-op rather than a failure.
pub fn migrate_command(config: &MigrationConfig, prompter: &mut dyn Prompter) -> Result<Option<MigrationReport>> {
    info!("Starting migration with {:?}", config);

    check_platform(config)?;

    let dropbox_root = cloud::locate_root(&config.dropbox_info, config.account)?;
    let root_display = dropbox_root.display().to_string();
    if !prompter.confirm(&prompts::prompt_use_dropbox_root(&root_display), false)? {
        return Err(SyncError::UserDeclined);
    }
    ui::success(&format!("Using '{}'. Continuing...", root_display));

    let answer = prompter.text(prompts::prompt_library_folder(), &config.library_folder)?;
    let library_folder = validate_library_folder(&answer)?;
    let library_target = dropbox_root.join(&library_folder);

    if !prompter.confirm(&prompts::prompt_store_under(&library_target.display().to_string()), false)? {
        return Err(SyncError::UserDeclined);
    }

    if !prompter.confirm(prompts::prompt_migrate_now(), false)? {
        return Err(SyncError::UserDeclined);
    }

    let folders = config.folders.folders();
    if !migration::verify_sources(&config.home, folders)? {
        ui::failure("Couldn't locate local Rekordbox Library folders. Aborting.");
        return Ok(None);
    }

    if library_target.is_dir() {
        ui::success("Folder already exists. Continuing...");
    } else {
        fs::create_dir_all(&library_target).at_path("create", &library_target)?;
        ui::success(&format!("Created new folder '{}'.", library_target.display()));
    }

    let plan = MigrationPlan {
        home: config.home.clone(),
        library_target,
        folders,
        on_conflict: config.on_conflict,
    };
    let report = migration::execute(&plan, prompter)?;

    if config.deactivate_agent {
        if report.has_failures() {
            ui::warning("Not deactivating the Rekordbox Agent because the migration had errors.");
        } else {
            agent::deactivate(&config.home, prompter)?;
        }
    }

    Ok(Some(report))
}

fn check_platform(config: &MigrationConfig) -> Result<()> {
    if config.skip_version_check {
        ui::warning("Skipping macOS version check.");
        return Ok(());
    }

    let version = platform::ensure_supported(config.minimum_os_version)?;
    ui::success(&format!("Running supported macOS version {}. Continuing...", version));
    Ok(())
}
