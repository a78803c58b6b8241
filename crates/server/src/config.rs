use crate::enrichment::PostEnricher;
use agora_sdk::config::{BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_ENV};
use agora_sdk::McpClient;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub mcp: McpConfig,
}

/// Where the MCP tool server lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default = "default_mcp_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

fn default_mcp_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> f64 {
    10.0
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            base_url: default_mcp_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Self::default()
        };

        config.mcp.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )?;

        Ok(config)
    }
}

impl McpConfig {
    /// Environment values win over the file.
    pub fn apply_overrides(&mut self, base_url: Option<String>, timeout: Option<String>) -> Result<()> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }

        if let Some(raw) = timeout {
            self.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value '{}'", TIMEOUT_ENV, raw))?;
        }

        self.timeout()?;
        Ok(())
    }

    pub fn timeout(&self) -> Result<Duration> {
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            bail!("MCP timeout must be positive, got {}", self.timeout_secs);
        }
        Duration::try_from_secs_f64(self.timeout_secs)
            .with_context(|| format!("MCP timeout out of range: {}", self.timeout_secs))
    }

    pub fn build_client(&self) -> Result<McpClient> {
        McpClient::builder()
            .base_url(&self.base_url)
            .timeout(self.timeout()?)
            .build()
            .context("Failed to create MCP client")
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: McpClient,
    pub enricher: PostEnricher,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        Ok(Self::with_client(config.mcp.build_client()?))
    }

    pub fn with_client(mcp: McpClient) -> Self {
        Self {
            enricher: PostEnricher::new(mcp.clone()),
            mcp,
        }
    }
}
