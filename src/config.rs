// src/config.rs
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::ConfigError;
use crate::utils::{normalize_output_filename, normalize_path};

/// Name of the optional settings file at the vault root.
pub const CONFIG_FILE_NAME: &str = ".packup.toml";

pub const DEFAULT_OUTPUT_FILE: &str = "packup-output.md";
pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const MIN_DEPTH: usize = 1;
pub const MAX_DEPTH_LIMIT: usize = 10;

/// Collection and export settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Hop limit for collection.
    pub max_depth: usize,
    /// Exact paths, or folders ending in `/`, that are never collected.
    pub exclude_paths: Vec<String>,
    /// Vault path the export is saved to.
    pub output_file: String,
    /// Whether notes linking *to* a collected note are collected too.
    pub include_backlinks: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            // the export itself is a note in the vault and links to everything it holds
            exclude_paths: vec![DEFAULT_OUTPUT_FILE.to_owned()],
            output_file: DEFAULT_OUTPUT_FILE.to_owned(),
            include_backlinks: true,
        }
    }
}

impl Settings {
    /// Loads settings from `.packup.toml` in `vault_root`, falling back to
    /// defaults when the file does not exist. Keys missing from the file keep
    /// their default values.
    ///
    /// # Errors
    ///
    /// This function may return an error if:
    /// * The settings file exists but cannot be read
    /// * The settings file is not valid TOML or has wrongly typed keys
    /// * The loaded settings fail [`Settings::validate`]
    #[inline]
    pub fn load(vault_root: &Path) -> Result<Self, ConfigError> {
        let path = vault_root.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No {CONFIG_FILE_NAME} in {}, using defaults", vault_root.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let settings: Self =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        let settings = settings.normalized();
        settings.validate()?;
        Ok(settings)
    }

    /// Cleans up user-entered paths: separators unified, blanks dropped and
    /// the output file forced to a `.md` name.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.exclude_paths = self
            .exclude_paths
            .iter()
            .map(|p| normalize_path(p))
            .filter(|p| !p.is_empty())
            .collect();
        self.output_file = if self.output_file.trim().is_empty() {
            DEFAULT_OUTPUT_FILE.to_owned()
        } else {
            normalize_output_filename(&self.output_file)
        };
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::DepthOutOfRange`] if `max_depth` is outside `1..=10`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth < MIN_DEPTH || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthOutOfRange {
                depth: self.max_depth,
                min: MIN_DEPTH,
                max: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}
