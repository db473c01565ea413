pub mod agent;
pub mod cli;
pub mod cloud;
pub mod commands;
pub mod config;
pub mod error;
pub mod migration;
pub mod paths;
pub mod platform;
pub mod ui;

pub use error::{Result, SyncError};
