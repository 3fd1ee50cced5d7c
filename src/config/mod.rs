//! Configuration module for the batch run

use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};

use crate::domain::NamingRules;

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub paths: PathSettings,
    pub naming: NamingRules,
    pub vignette: VignetteSettings,
    pub logging: LoggingSettings,
}

/// Locations of the input tree, output tree and run log
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathSettings {
    /// Directory the other paths are resolved against
    pub root: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
}

/// Names given to the group and object added to every vignette
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VignetteSettings {
    pub group_name: String,
    pub object_name: String,
}

/// Diagnostic output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by RUST_LOG
    pub filter: String,
    pub json: bool,
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with VIGNETTE__)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("VIGNETTE_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // VIGNETTE__PATHS__ROOT, VIGNETTE__NAMING__BASE_EXTENSION, etc.
            .add_source(
                Environment::with_prefix("VIGNETTE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Root of the tree scanned for base images
    pub fn source_root(&self) -> PathBuf {
        self.paths.root.join(&self.paths.input_dir)
    }

    /// Root of the mirrored tree receiving the vignettes
    pub fn dest_root(&self) -> PathBuf {
        self.paths.root.join(&self.paths.output_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        self.paths.root.join(&self.paths.log_file)
    }

    /// Settings rooted at `root`, everything else defaulted
    #[cfg(test)]
    pub fn rooted_at(root: &Path) -> Self {
        let mut settings = Settings::default();
        settings.paths.root = root.to_path_buf();
        settings
    }
}

/// Directory holding the running executable, falling back to the working directory
fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            paths: PathSettings {
                root: executable_dir(),
                input_dir: PathBuf::from("InputFiles"),
                output_dir: PathBuf::from("OutputFiles"),
                log_file: PathBuf::from("log.txt"),
            },
            naming: NamingRules::default(),
            vignette: VignetteSettings {
                group_name: "car".to_string(),
                object_name: "color".to_string(),
            },
            logging: LoggingSettings {
                filter: "vignette_batch=info".to_string(),
                json: false,
            },
        }
    }
}
