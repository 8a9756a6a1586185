use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use credhash_core::CostProfile;

use crate::cli::Cli;
use crate::errors::{credential_error, CliError};

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredhashConfig {
    #[serde(default)]
    pub cost: CostProfile,
}

/// Config file location and whether the user named it explicitly.
#[derive(Debug, Clone)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub explicit: bool,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn resolve_config_location(cli: &Cli) -> anyhow::Result<ConfigLocation> {
    match cli.config.as_deref().filter(|value| !value.trim().is_empty()) {
        Some(path) => Ok(ConfigLocation {
            path: PathBuf::from(path),
            explicit: true,
        }),
        None => Ok(ConfigLocation {
            path: default_config_path()?,
            explicit: false,
        }),
    }
}

/// Load the effective config.
///
/// A missing default config means built-in defaults; a missing config the
/// user named explicitly is an error. The cost profile is validated either
/// way.
pub fn load_config(location: &ConfigLocation) -> anyhow::Result<CredhashConfig> {
    let config = if location.path.exists() {
        read_config(&location.path)?
    } else if location.explicit {
        return Err(CliError::not_found(
            format!("Config file not found: {}", location.path.display()),
            "Hint: Run `credhash config init` to create it.",
        )
        .into());
    } else {
        tracing::debug!(path = %location.path.display(), "no config file, using defaults");
        CredhashConfig::default()
    };

    config.cost.validate().map_err(credential_error)?;
    Ok(config)
}

pub fn read_config(path: &Path) -> anyhow::Result<CredhashConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents).map_err(|e| {
        anyhow::Error::from(CliError::invalid_input(format!(
            "Failed to parse config {}: {}",
            path.display(),
            e
        )))
    })
}

pub fn write_config(path: &Path, config: &CredhashConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("credhash"));
        }
    }
    Ok(home_dir()?.join(".config").join("credhash"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
