//! Configuration: RPC endpoint, explorer endpoint, API key
//!
//! Everything is optional; missing values fall back to public defaults.
//! The explorer API key may come from the config file or the environment;
//! its absence only degrades the transaction-history request to the
//! unauthenticated tier.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

const DEFAULT_RPC_URL: &str = "https://cloudflare-eth.com";
const DEFAULT_EXPLORER_URL: &str = "https://api.etherscan.io/api";
const PLACEHOLDER_API_KEY: &str = "YourApiKeyToken";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP JSON-RPC endpoint
    #[serde(default)]
    pub rpc: Option<String>,

    /// Block-explorer API base URL
    #[serde(default)]
    pub explorer: Option<String>,

    /// Block-explorer API key
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Config {
    pub fn rpc_url(&self) -> String {
        self.rpc
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(normalize_http_endpoint)
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string())
    }

    pub fn explorer_url(&self) -> String {
        self.explorer
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string())
    }

    /// Config file first, then environment, then the placeholder key
    pub fn explorer_api_key(&self) -> String {
        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return key.to_string();
        }
        if let Ok(key) = std::env::var("ETHERSCAN_API_KEY") {
            if !key.trim().is_empty() {
                return key.trim().to_string();
            }
        }
        PLACEHOLDER_API_KEY.to_string()
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("ENSCOPE_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("enscope").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("enscope").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "enscope", "enscope")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn normalize_http_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
