use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::cloud::Account;
use crate::config::ConfigOverrides;
use crate::migration::ConflictPolicy;
use crate::paths::FolderSet;

#[derive(Parser)]
#[command(name = "rekordbox-sync")]
#[command(about = "Move a local rekordbox library into Dropbox and link it back in place")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Answer every confirmation with "yes" and accept default answers
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Use this directory instead of the current user's home
    #[arg(long, global = true, value_name = "PATH")]
    pub home: Option<PathBuf>,

    /// Read the Dropbox metadata from this file instead of ~/.dropbox/info.json
    #[arg(long, global = true, value_name = "PATH")]
    pub dropbox_info: Option<PathBuf>,

    /// Alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip the macOS version check
    #[arg(long, global = true)]
    pub skip_version_check: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move the library into Dropbox and link it back (default)
    Migrate(MigrateArgs),
    /// Stop the Rekordbox Agent from launching at login
    DeactivateAgent,
    /// Show where the library lives and whether it is linked
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct MigrateArgs {
    /// Folder inside the Dropbox root that holds the library
    #[arg(long, value_name = "NAME")]
    pub library_folder: Option<String>,

    /// Which local folders to migrate
    #[arg(long, value_enum)]
    pub folders: Option<FolderSet>,

    /// What to do when the library folder already holds a library
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Dropbox account to use
    #[arg(long, value_enum)]
    pub account: Option<Account>,

    /// Also deactivate the Rekordbox Agent once the migration succeeds
    #[arg(long)]
    pub deactivate_agent: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct StatusArgs {
    /// Folder inside the Dropbox root that holds the library
    #[arg(long, value_name = "NAME")]
    pub library_folder: Option<String>,

    /// Which local folders to report on
    #[arg(long, value_enum)]
    pub folders: Option<FolderSet>,

    /// Dropbox account to use
    #[arg(long, value_enum)]
    pub account: Option<Account>,
}

impl GlobalArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            home: self.home.clone(),
            dropbox_info: self.dropbox_info.clone(),
            assume_yes: self.yes,
            skip_version_check: self.skip_version_check,
            ..Default::default()
        }
    }
}

impl MigrateArgs {
    pub fn overrides(&self, global: &GlobalArgs) -> ConfigOverrides {
        ConfigOverrides {
            library_folder: self.library_folder.clone(),
            folders: self.folders,
            on_conflict: self.on_conflict,
            account: self.account,
            deactivate_agent: self.deactivate_agent,
            ..global.overrides()
        }
    }
}

impl StatusArgs {
    pub fn overrides(&self, global: &GlobalArgs) -> ConfigOverrides {
        ConfigOverrides {
            library_folder: self.library_folder.clone(),
            folders: self.folders,
            account: self.account,
            ..global.overrides()
        }
    }
}
