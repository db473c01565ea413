use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use rekordbox_sync::cli::{Cli, Commands, MigrateArgs};
use rekordbox_sync::commands::{deactivate_agent_command, migrate_command, status_command};
use rekordbox_sync::config::{Config, MigrationConfig};
use rekordbox_sync::ui;
use rekordbox_sync::{Result, SyncError};

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    if cli.global.no_color {
        ui::disable_colors();
    }
    info!("Starting rekordbox-sync");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(SyncError::UserDeclined) => {
            ui::failure("Aborted.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ui::failure(&e.to_string());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Log to a file in the config directory, truncated on each run. This is
/// the only write made before the platform guard.
fn init_logging() {
    let Ok(dir) = Config::ensure_config_dir() else {
        return;
    };
    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(dir.join("rekordbox-sync.log"))
    else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let file_config =
        Config::load(cli.global.config.as_deref()).map_err(|e| SyncError::Config(format!("{:#}", e)))?;

    match cli.command {
        None => {
            let config = MigrationConfig::resolve(&file_config, MigrateArgs::default().overrides(&cli.global))?;
            ui::clear_screen();
            migrate_command(&config, &mut *config.prompter()).map(|_| ())
        }
        Some(Commands::Migrate(args)) => {
            let config = MigrationConfig::resolve(&file_config, args.overrides(&cli.global))?;
            ui::clear_screen();
            migrate_command(&config, &mut *config.prompter()).map(|_| ())
        }
        Some(Commands::DeactivateAgent) => {
            let config = MigrationConfig::resolve(&file_config, cli.global.overrides())?;
            deactivate_agent_command(&config, &mut *config.prompter()).map(|_| ())
        }
        Some(Commands::Status(args)) => {
            let config = MigrationConfig::resolve(&file_config, args.overrides(&cli.global))?;
            status_command(&config)
        }
    }
}
