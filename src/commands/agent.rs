use std::path::PathBuf;

use log::info;

use crate::agent;
use crate::config::MigrationConfig;
use crate::error::Result;
use crate::platform;
use crate::ui::{self, Prompter};

pub fn deactivate_agent_command(config: &MigrationConfig, prompter: &mut dyn Prompter) -> Result<PathBuf> {
    info!("Deactivating Rekordbox Agent under {:?}", config.home);

    if config.skip_version_check {
        ui::warning("Skipping macOS version check.");
    } else {
        platform::ensure_supported(config.minimum_os_version)?;
    }

    agent::deactivate(&config.home, prompter)
}
