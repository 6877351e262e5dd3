//! Application configuration.

use crate::error::{AppError, AppResult};
use merit_core::{Price, SubjectId, TokenId};
use merit_oracle::{ConsensusConfig, ValuatorConfig};
use merit_risk::RiskConfig;
use merit_trading::TradingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Concurrent WebSocket clients allowed on the event stream.
    #[serde(default = "default_max_ws_connections")]
    pub max_ws_connections: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_ws_connections() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_ws_connections: default_max_ws_connections(),
        }
    }
}

/// One reputation token registered into the directory at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSeed {
    pub token_id: TokenId,
    pub subject_id: SubjectId,
    /// Display symbol (e.g. "RPT-ALPHA").
    pub symbol: String,
    /// Initial unit price in settlement currency.
    pub price: Price,
}

/// Root configuration, one section per component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub consensus: ConsensusConfig,
    #[serde(default)]
    pub valuation: ValuatorConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub trading: TradingConfig,
    /// Tokens to seed the directory with.
    #[serde(default)]
    pub tokens: Vec<TokenSeed>,
}

impl AppConfig {
    /// Load configuration from the `MERIT_CONFIG` path or the default
    /// location, falling back to built-in defaults when neither exists.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("MERIT_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.consensus.validate().map_err(AppError::Config)?;
        self.trading.validate().map_err(AppError::Config)?;
        Ok(())
    }
}
