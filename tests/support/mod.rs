//! Shared fixtures for integration tests

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use rekordbox_sync::Result;
use rekordbox_sync::config::{Config, ConfigOverrides, MigrationConfig};
use rekordbox_sync::ui::Prompter;
use serde_json::json;
use tempfile::TempDir;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub enum Answer {
    Yes,
    No,
    /// Take whatever default the prompt offers
    Default,
    Text(String),
}

/// Replays a fixed list of answers and records every question asked.
pub struct Scripted {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
}

impl Scripted {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// For runs that must not ask anything.
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt: {}", prompt))
    }
}

impl Prompter for Scripted {
    fn confirm(&mut self, prompt: &str, default_yes: bool) -> Result<bool> {
        match self.next(prompt) {
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            Answer::Default => Ok(default_yes),
            other => panic!("expected yes/no for '{}', got {:?}", prompt, other),
        }
    }

    fn text(&mut self, prompt: &str, default: &str) -> Result<String> {
        match self.next(prompt) {
            Answer::Text(s) => Ok(s),
            Answer::Default => Ok(default.to_string()),
            other => panic!("expected text for '{}', got {:?}", prompt, other),
        }
    }
}

/// A fake home directory with a rekordbox library and a Dropbox folder.
pub struct Fixture {
    pub temp: TempDir,
    pub home: PathBuf,
    pub dropbox: PathBuf,
    pub info: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let dropbox = home.join("Dropbox");
        let info = home.join(".dropbox").join("info.json");

        let pioneer = home.join("Library").join("Pioneer").join("rekordbox");
        fs::create_dir_all(&pioneer).unwrap();
        fs::write(pioneer.join("master.db"), "local library").unwrap();
        fs::create_dir_all(&dropbox).unwrap();
        fs::create_dir_all(info.parent().unwrap()).unwrap();
        fs::write(
            &info,
            json!({ "personal": { "path": dropbox, "host": 42, "is_team": false } }).to_string(),
        )
        .unwrap();

        Self {
            temp,
            home,
            dropbox,
            info,
        }
    }

    /// Add the two Application Support folders.
    pub fn with_app_support(self) -> Self {
        for name in ["Pioneer", "rekordboxAgent"] {
            let dir = self.app_support().join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("settings.xml"), name).unwrap();
        }
        self
    }

    /// Pretend another machine already synced a library into Dropbox.
    pub fn with_cloud_library(self, folder: &str) -> Self {
        let remote = self.dropbox.join(folder).join("Pioneer").join("rekordbox");
        fs::create_dir_all(&remote).unwrap();
        fs::write(remote.join("master.db"), "cloud library").unwrap();
        self
    }

    pub fn app_support(&self) -> PathBuf {
        self.home.join("Library").join("Application Support")
    }

    pub fn local_pioneer(&self) -> PathBuf {
        self.home.join("Library").join("Pioneer")
    }

    pub fn config(&self) -> MigrationConfig {
        self.config_with(ConfigOverrides::default())
    }

    pub fn config_with(&self, overrides: ConfigOverrides) -> MigrationConfig {
        MigrationConfig::resolve(
            &Config::default(),
            ConfigOverrides {
                home: Some(self.home.clone()),
                skip_version_check: true,
                ..overrides
            },
        )
        .unwrap()
    }

    /// Every entry under the temp root with its kind, for before/after comparisons.
    pub fn snapshot(&self) -> Vec<(PathBuf, &'static str)> {
        snapshot(self.temp.path())
    }
}

pub fn snapshot(root: &Path) -> Vec<(PathBuf, &'static str)> {
    let mut entries: Vec<_> = WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let kind = if e.path_is_symlink() {
                "link"
            } else if e.file_type().is_dir() {
                "dir"
            } else {
                "file"
            };
            (e.path().strip_prefix(root).unwrap().to_path_buf(), kind)
        })
        .collect();
    entries.sort();
    entries
}

pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}
