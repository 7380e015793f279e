use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::errors::ConfigError;
use super::model::{AdminConfig, AdminConfigFile};

/// Status describing how the config was loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigLoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Result of loading the config from disk.
#[derive(Debug)]
pub(crate) struct ConfigLoad {
    config: AdminConfig,
    status: ConfigLoadStatus,
}

impl ConfigLoad {
    fn new(config: AdminConfig, status: ConfigLoadStatus) -> Self {
        Self { config, status }
    }

    /// Consume the value and return both payload and status.
    pub(crate) fn into_parts(self) -> (AdminConfig, ConfigLoadStatus) {
        (self.config, self.status)
    }
}

pub(crate) fn load_config() -> Result<ConfigLoad, ConfigError> {
    load_config_from_path(&config_path())
}

pub(crate) fn save_config(config: &AdminConfig) -> Result<(), ConfigError> {
    save_config_to_path(&config_path(), config)
}

/// Load the config, falling back to defaults on any error.
///
/// A missing file is seeded with the defaults so it can be edited.
pub(crate) fn load_initial_config() -> AdminConfig {
    let load = match load_config() {
        Ok(load) => load,
        Err(err) => {
            log::warn!("failed to read admin config, using defaults: {err}");
            return AdminConfig::default();
        },
    };

    let (config, status) = load.into_parts();
    match status {
        ConfigLoadStatus::Loaded => {
            log::info!("loaded admin config from {}", config_path().display());
        },
        ConfigLoadStatus::Missing => {
            if let Err(err) = save_config(&config) {
                log::warn!("failed to write default admin config: {err}");
            }
        },
        ConfigLoadStatus::Invalid(message) => {
            log::warn!("admin config invalid, using defaults: {message}");
        },
    }
    config
}

fn load_config_from_path(path: &Path) -> Result<ConfigLoad, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigLoad::new(
                AdminConfig::default(),
                ConfigLoadStatus::Missing,
            ));
        },
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str::<AdminConfigFile>(&data) {
        Ok(file) => Ok(ConfigLoad::new(file.into(), ConfigLoadStatus::Loaded)),
        Err(err) => Ok(ConfigLoad::new(
            AdminConfig::default(),
            ConfigLoadStatus::Invalid(format!("{err}")),
        )),
    }
}

fn save_config_to_path(
    path: &Path,
    config: &AdminConfig,
) -> Result<(), ConfigError> {
    let payload = serde_json::to_vec_pretty(&AdminConfigFile::from(config))?;
    replace_file(path, &payload)?;
    log::debug!("wrote admin config to {}", path.display());
    Ok(())
}

const APP_DIR: &str = "homepage-admin";
const CONFIG_FILE: &str = "config.json";

fn config_path() -> PathBuf {
    config_path_under(std::env::var_os("HOME").map(PathBuf::from))
}

/// `<home>/.config/homepage-admin/config.json`, or the same file under the
/// temp dir when there is no home.
fn config_path_under(home: Option<PathBuf>) -> PathBuf {
    let base = match home {
        Some(home) => home.join(".config"),
        None => std::env::temp_dir(),
    };
    base.join(APP_DIR).join(CONFIG_FILE)
}

/// Write `payload` next to `path` and move it into place.
///
/// Readers see either the old file or the complete new one.
fn replace_file(path: &Path, payload: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let staged = staging_path(path);
    let mut file = File::create(&staged)?;
    file.write_all(payload)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&staged, path).inspect_err(|_| {
        let _ = fs::remove_file(&staged);
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.part", std::process::id()));
    path.with_file_name(name)
}
