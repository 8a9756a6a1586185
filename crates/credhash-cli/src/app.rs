//! Per-invocation context shared by command handlers.

use crate::cli::Cli;
use crate::config::{load_config, resolve_config_location, ConfigLocation, CredhashConfig};
use crate::ui::UiContext;

pub struct AppContext {
    pub ui: UiContext,
    pub config_location: ConfigLocation,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        Ok(Self {
            ui: UiContext::from_env(cli.json, cli.quiet),
            config_location: resolve_config_location(cli)?,
        })
    }

    pub fn load_config(&self) -> anyhow::Result<CredhashConfig> {
        load_config(&self.config_location)
    }
}
