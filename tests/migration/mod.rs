//! Executor tests against real directories

use std::fs;

use rekordbox_sync::SyncError;
use rekordbox_sync::migration::{self, ConflictPolicy, MigrationMode, MigrationPlan, StepOutcome};
use rekordbox_sync::paths::FolderSet;

use crate::support::{Answer, Fixture, Scripted, is_symlink};

fn plan(fixture: &Fixture, folders: FolderSet, on_conflict: ConflictPolicy) -> MigrationPlan {
    let library_target = fixture.dropbox.join("RekordboxLibrary");
    fs::create_dir_all(&library_target).unwrap();
    MigrationPlan {
        home: fixture.home.clone(),
        library_target,
        folders: folders.folders(),
        on_conflict,
    }
}

#[test]
fn test_fresh_migration_moves_and_links() {
    let fixture = Fixture::new();
    let plan = plan(&fixture, FolderSet::Pioneer, ConflictPolicy::Backup);
    let mut prompter = Scripted::none();

    let report = migration::execute(&plan, &mut prompter).unwrap();

    let destination = plan.library_target.join("Pioneer");
    assert_eq!(report.mode, MigrationMode::Fresh);
    assert!(!report.has_failures());
    assert!(prompter.asked.is_empty());

    assert!(is_symlink(&fixture.local_pioneer()));
    assert_eq!(fs::read_link(fixture.local_pioneer()).unwrap(), destination);
    assert!(destination.is_dir() && !is_symlink(&destination));
    assert_eq!(
        fs::read_to_string(destination.join("rekordbox").join("master.db")).unwrap(),
        "local library"
    );
    // reading through the link reaches the moved data
    assert_eq!(
        fs::read_to_string(fixture.local_pioneer().join("rekordbox").join("master.db")).unwrap(),
        "local library"
    );
}

#[test]
fn test_full_folder_set_nests_application_support() {
    let fixture = Fixture::new().with_app_support();
    let plan = plan(&fixture, FolderSet::Full, ConflictPolicy::Backup);

    let report = migration::execute(&plan, &mut Scripted::none()).unwrap();

    assert!(!report.has_failures());
    assert_eq!(report.linked().count(), 3);
    for name in ["Pioneer", "rekordboxAgent"] {
        let destination = plan.library_target.join("Application Support").join(name);
        assert_eq!(fs::read_to_string(destination.join("settings.xml")).unwrap(), name);
        assert_eq!(fs::read_link(fixture.app_support().join(name)).unwrap(), destination);
    }
}

#[test]
fn test_conflict_declined_touches_nothing() {
    let fixture = Fixture::new().with_cloud_library("RekordboxLibrary");
    let plan = plan(&fixture, FolderSet::Pioneer, ConflictPolicy::Backup);
    let before = fixture.snapshot();
    let mut prompter = Scripted::new([Answer::No]);

    let err = migration::execute(&plan, &mut prompter).unwrap_err();

    assert!(matches!(err, SyncError::UserDeclined));
    assert_eq!(err.exit_code(), 0);
    assert_eq!(prompter.asked.len(), 1);
    assert!(prompter.asked[0].contains("Overwrite local database?"));
    assert_eq!(fixture.snapshot(), before);
}

#[test]
fn test_conflict_default_answer_is_no() {
    let fixture = Fixture::new().with_cloud_library("RekordboxLibrary");
    let plan = plan(&fixture, FolderSet::Pioneer, ConflictPolicy::Backup);
    let before = fixture.snapshot();

    let err = migration::execute(&plan, &mut Scripted::new([Answer::Default])).unwrap_err();

    assert!(err.is_declined());
    assert_eq!(fixture.snapshot(), before);
}

#[test]
fn test_conflict_confirmed_backs_up_and_links() {
    let fixture = Fixture::new().with_cloud_library("RekordboxLibrary");
    let plan = plan(&fixture, FolderSet::Pioneer, ConflictPolicy::Backup);

    let report = migration::execute(&plan, &mut Scripted::new([Answer::Yes])).unwrap();

    assert_eq!(report.mode, MigrationMode::Overwrite);
    assert!(!report.has_failures());

    let backup = fixture.home.join("Library").join("Pioneer_backup");
    assert_eq!(
        fs::read_to_string(backup.join("rekordbox").join("master.db")).unwrap(),
        "local library"
    );
    assert_eq!(
        fs::read_link(fixture.local_pioneer()).unwrap(),
        plan.library_target.join("Pioneer")
    );
    assert_eq!(
        fs::read_to_string(fixture.local_pioneer().join("rekordbox").join("master.db")).unwrap(),
        "cloud library"
    );
}

#[test]
fn test_conflict_with_abort_policy_mutates_nothing() {
    let fixture = Fixture::new().with_cloud_library("RekordboxLibrary");
    let plan = plan(&fixture, FolderSet::Pioneer, ConflictPolicy::Abort);
    let before = fixture.snapshot();
    let mut prompter = Scripted::none();

    let err = migration::execute(&plan, &mut prompter).unwrap_err();

    assert!(matches!(err, SyncError::PreconditionFailed(_)));
    assert_eq!(err.exit_code(), 1);
    assert!(prompter.asked.is_empty());
    assert_eq!(fixture.snapshot(), before);
}

#[test]
fn test_existing_backup_is_preserved_and_reported() {
    let fixture = Fixture::new().with_cloud_library("RekordboxLibrary");
    let old_backup = fixture.home.join("Library").join("Pioneer_backup");
    fs::create_dir_all(&old_backup).unwrap();
    fs::write(old_backup.join("old.txt"), "older backup").unwrap();
    let plan = plan(&fixture, FolderSet::Pioneer, ConflictPolicy::Backup);

    let report = migration::execute(&plan, &mut Scripted::new([Answer::Yes])).unwrap();

    assert!(report.has_failures());
    assert_eq!(fs::read_to_string(old_backup.join("old.txt")).unwrap(), "older backup");
    // the local folder is still there, so the link is skipped rather than forced
    assert!(!is_symlink(&fixture.local_pioneer()));
    assert!(report
        .steps
        .iter()
        .any(|s| matches!(s, StepOutcome::Skipped { path, .. } if *path == fixture.local_pioneer())));
}

#[test]
fn test_partial_cloud_copy_moves_missing_folders() {
    let fixture = Fixture::new().with_app_support().with_cloud_library("RekordboxLibrary");
    let plan = plan(&fixture, FolderSet::Full, ConflictPolicy::Backup);

    let report = migration::execute(&plan, &mut Scripted::new([Answer::Yes])).unwrap();

    assert!(!report.has_failures());
    assert!(fixture.home.join("Library").join("Pioneer_backup").is_dir());
    let agent_destination = plan.library_target.join("Application Support").join("rekordboxAgent");
    assert_eq!(
        fs::read_to_string(agent_destination.join("settings.xml")).unwrap(),
        "rekordboxAgent"
    );
    assert_eq!(
        fs::read_link(fixture.app_support().join("rekordboxAgent")).unwrap(),
        agent_destination
    );
}

#[test]
fn test_failed_move_does_not_stop_the_run() {
    let fixture = Fixture::new();
    // Only Pioneer exists locally; the two Application Support moves fail.
    let plan = plan(&fixture, FolderSet::Full, ConflictPolicy::Backup);

    let report = migration::execute(&plan, &mut Scripted::none()).unwrap();

    assert_eq!(report.failures().count(), 2);
    assert_eq!(
        fs::read_link(fixture.local_pioneer()).unwrap(),
        plan.library_target.join("Pioneer")
    );
}
