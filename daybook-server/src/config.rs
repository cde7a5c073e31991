//! Server configuration.

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_PORT: u16 = 4280;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Configuration at ~/.config/daybook/config.toml
///
/// A missing file means defaults; a present but unparseable file is an error.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ServerConfig::default());
        };

        let path = config_dir.join("daybook/config.toml");
        if !path.exists() {
            return Ok(ServerConfig::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid config at {}", path.display()))?;

        Ok(config)
    }
}
