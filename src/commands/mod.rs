pub mod agent;
pub mod migrate;
pub mod status;

pub use agent::deactivate_agent_command;
pub use migrate::migrate_command;
pub use status::status_command;
